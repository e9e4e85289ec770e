use crate::{filters::FontFilter, GlyphsmithError};
use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_FOUNDRY: &str = "Naipe Foundry";
const PORTUGUESE: &str = "PTG";
const SPANISH: &str = "ESP";

#[allow(clippy::unwrap_used)]
static PRERELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(beta\s*\d*|alpha)$").unwrap());

/// A filter that writes a custom-font licence for one client
///
/// Any existing licence text, in every language, is replaced by English,
/// Portuguese and Spanish texts, and the trademark is set. The family name
/// used in the texts has pre-release markers such as "Beta 2" removed.
pub struct SetLicense {
    client: String,
    foundry: String,
}

impl SetLicense {
    pub fn new(client: impl Into<String>, foundry: impl Into<String>) -> Self {
        SetLicense {
            client: client.into(),
            foundry: foundry.into(),
        }
    }

    fn english(&self, family: &str) -> String {
        format!(
            "When using the {family} fonts, you agree to use them exclusively in branding and communication materials related to {client} and are not authorized to use it for any other purpose.

Modifying, adapting, altering, converting, translating, or otherwise modifying the {family} font software is not permitted without written authorisation from {foundry}.

Sending or sharing the {family} fonts with anyone or any organisation, or any third party that has not been directly contracted by {client} as a supplier, partner, franchisee, contractor, or otherwise associated, is not allowed.",
            family = family,
            client = self.client,
            foundry = self.foundry
        )
    }

    fn portuguese(&self, family: &str) -> String {
        format!(
            "Ao utilizar as fontes digitais {family}, você aceita usá-las exclusivamente em materiais de marca e comunicação relacionados à {client} e reconhece que não está autorizado a usá-las para nenhum outro propósito.

Não é permitido modificar, adaptar, alterar, converter, traduzir ou de qualquer outra forma modificar o software da fonte digital {family} sem autorização por escrito da {foundry}.

Não é permitido enviar ou compartilhar as fontes {family} com qualquer pessoa ou organização, ou com qualquer terceiro que não tenha sido contratado diretamente pela {client} como fornecedor, parceiro, franqueado, contratado ou de qualquer outra forma associado.",
            family = family,
            client = self.client,
            foundry = self.foundry
        )
    }

    fn spanish(&self, family: &str) -> String {
        format!(
            "Al utilizar las tipografías digitales {family}, aceptas utilizarlas exclusivamente en materiales de marca y comunicación relacionados con el {client} y que no estás autorizado a utilizarlas para ningún otro propósito.

No se permite modificar, adaptar, alterar, convertir, traducir o de cualquier otra manera modificar el software de tipografía digital {family} sin la autorización por escrito de {foundry}.

No está permitido enviar o compartir las fuentes {family} con ninguna persona u organización, o cualquier tercero que no haya sido contratado directamente por {client} como proveedor, socio, franquiciado, contratista o de cualquier otra manera asociado.",
            family = family,
            client = self.client,
            foundry = self.foundry
        )
    }
}

/// The family name without any trailing "Beta", "Beta 3" or "Alpha"
pub fn release_family_name(family: &str) -> String {
    PRERELEASE.replace(family, "").trim().to_string()
}

impl FontFilter for SetLicense {
    fn apply(&self, font: &mut crate::Font) -> Result<(), GlyphsmithError> {
        let family = match font.names.family_name.get_default() {
            Some(name) => release_family_name(name),
            None => {
                log::warn!("Font has no family name");
                String::new()
            }
        };
        log::info!("Setting {} licence for {}", family, self.client);
        let license = &mut font.names.license;
        license.clear();
        license.set_default(self.english(&family));
        license.insert(PORTUGUESE.to_string(), self.portuguese(&family));
        license.insert(SPANISH.to_string(), self.spanish(&family));
        font.names.trademark.clear();
        font.names.trademark.set_default(format!(
            "{} is a trademark of {}. All rights reserved.",
            family, self.foundry
        ));
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, GlyphsmithError>
    where
        Self: Sized,
    {
        let (client, foundry) = match s.split_once('|') {
            Some((client, foundry)) => (client.trim(), foundry.trim()),
            None => (s.trim(), DEFAULT_FOUNDRY),
        };
        if client.is_empty() {
            return Err(GlyphsmithError::FilterError(
                "Please give the client's full legal name".to_string(),
            ));
        }
        let foundry = if foundry.is_empty() {
            DEFAULT_FOUNDRY
        } else {
            foundry
        };
        Ok(SetLicense::new(client, foundry))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("setlicense")
            .long("set-license")
            .help("Replace the licence and trademark with a custom-font licence for CLIENT")
            .value_name("CLIENT[|FOUNDRY]")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::Font;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Naipe Sans", "Naipe Sans")]
    #[case("Naipe Sans Beta", "Naipe Sans")]
    #[case("Naipe Sans beta 12", "Naipe Sans")]
    #[case("Naipe Sans ALPHA", "Naipe Sans")]
    #[case("Alphabet", "Alphabet")]
    fn test_release_family_name(#[case] family: &str, #[case] expected: &str) {
        assert_eq!(release_family_name(family), expected);
    }

    #[test]
    fn test_set_license() {
        let mut font = Font::new();
        font.names.family_name.set_default("Cardume Beta 2".to_string());
        font.names
            .license
            .insert("DEU".to_string(), "Alte Lizenz".to_string());
        SetLicense::from_str("Banco Exemplo S.A.")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        let license = &font.names.license;
        assert_eq!(license.get("DEU"), None);
        assert!(license.get_default().unwrap().starts_with(
            "When using the Cardume fonts, you agree to use them exclusively in branding and communication materials related to Banco Exemplo S.A."
        ));
        assert!(license.get(PORTUGUESE).unwrap().contains("por escrito da Naipe Foundry"));
        assert!(license.get(SPANISH).unwrap().contains("directamente por Banco Exemplo S.A."));
        assert_eq!(
            font.names.trademark.get_default().unwrap(),
            "Cardume is a trademark of Naipe Foundry. All rights reserved."
        );
    }

    #[test]
    fn test_other_foundry() {
        let mut font = Font::new();
        font.names.family_name.set_default("Cardume".to_string());
        SetLicense::from_str("Client | Other Type Co")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        assert_eq!(
            font.names.trademark.get_default().unwrap(),
            "Cardume is a trademark of Other Type Co. All rights reserved."
        );
    }

    #[test]
    fn test_client_required() {
        assert!(SetLicense::from_str("").is_err());
        assert!(SetLicense::from_str(" |Foundry").is_err());
    }
}
