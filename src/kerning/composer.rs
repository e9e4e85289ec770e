//! Turning character sequences into kerning test text.
//!
//! Text is built from [`Token`]s: literal characters, or explicit glyph
//! references written `/name` as in a Glyphs edit view. A glyph reference
//! is always separated from its neighbours by a space.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Char(String),
    Glyph(String),
}

impl Token {
    pub fn char(s: impl Into<String>) -> Self {
        Token::Char(s.into())
    }

    pub fn glyph(s: impl Into<String>) -> Self {
        Token::Glyph(s.into())
    }

    fn is_glyph(&self) -> bool {
        matches!(self, Token::Glyph(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // A bare slash would start a glyph reference
            Token::Char(s) => f.write_str(&s.replace('/', "//")),
            Token::Glyph(name) => write!(f, "/{}", name),
        }
    }
}

/// Render a token run as edit-view text
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if let Token::Char(s) = token {
            if s.is_empty() {
                continue;
            }
        }
        if previous.is_some_and(|p| p.is_glyph() || token.is_glyph()) {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        previous = Some(token);
    }
    out
}

/// One member of the primary group, tagged with the rule that formats it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryToken {
    Letter(String),
    PairedPunctuation { open: String, close: String },
    SinglePunctuation(String),
    Numeral { glyph: String, zero: String },
}

impl PrimaryToken {
    /// Classify a punctuation group member: two characters make a pair
    pub fn punctuation(member: &str) -> Self {
        let mut chars = member.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => PrimaryToken::PairedPunctuation {
                open: open.to_string(),
                close: close.to_string(),
            },
            _ => PrimaryToken::SinglePunctuation(member.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LineLayout {
    /// One line per primary character, its pairs separated by spaces
    #[default]
    PerPrimary,
    /// Every pair on its own line
    PerPair,
}

/// A labelled run of kerning lines for one primary/secondary combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBlock {
    pub header: String,
    pub lines: Vec<String>,
}

impl OutputBlock {
    pub fn render(&self) -> String {
        let mut text = format!("--- {} ---", self.header);
        for line in &self.lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

/// Join blocks into the text of a single tab
pub fn render_blocks(blocks: &[OutputBlock]) -> String {
    blocks
        .iter()
        .map(OutputBlock::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Everything needed to compose one block
#[derive(Debug, Clone)]
pub struct BlockPlan<'a> {
    pub header: String,
    pub primary: &'a [PrimaryToken],
    pub secondary: &'a [Token],
    /// Framing for letter pairs
    pub left: &'a str,
    pub right: &'a str,
    pub layout: LineLayout,
}

/// Compose a block, or nothing if either side is empty
pub fn compose_block(plan: &BlockPlan) -> Option<OutputBlock> {
    if plan.primary.is_empty() || plan.secondary.is_empty() {
        return None;
    }
    let lines = plan
        .primary
        .iter()
        .flat_map(|token| format_primary(token, plan))
        .collect();
    Some(OutputBlock {
        header: plan.header.clone(),
        lines,
    })
}

fn format_primary(token: &PrimaryToken, plan: &BlockPlan) -> Vec<String> {
    match token {
        PrimaryToken::Letter(c) => pair_lines(
            letter_pairs(&Token::char(c.as_str()), plan.left, plan.right, plan.secondary),
            plan.layout,
        ),
        PrimaryToken::Numeral { glyph, zero } => pair_lines(
            numeral_pairs(&Token::glyph(glyph.as_str()), zero, plan.secondary),
            plan.layout,
        ),
        PrimaryToken::SinglePunctuation(mark) => vec![single_punctuation_line(mark, plan.secondary)],
        PrimaryToken::PairedPunctuation { open, close } => {
            vec![paired_punctuation_line(open, close, plan.secondary)]
        }
    }
}

fn pair_lines(pairs: Vec<Vec<Token>>, layout: LineLayout) -> Vec<String> {
    let rendered = pairs.iter().map(|pair| render_tokens(pair));
    match layout {
        LineLayout::PerPrimary => vec![rendered.collect::<Vec<_>>().join(" ")],
        LineLayout::PerPair => rendered.collect(),
    }
}

/// `left p s p right` for every secondary `s`
fn letter_pairs(primary: &Token, left: &str, right: &str, secondary: &[Token]) -> Vec<Vec<Token>> {
    secondary
        .iter()
        .map(|s| {
            vec![
                Token::char(left),
                primary.clone(),
                s.clone(),
                primary.clone(),
                Token::char(right),
            ]
        })
        .collect()
}

/// `zero p s p zero`, framed by the zero of the primary's own figure set
fn numeral_pairs(primary: &Token, zero: &str, secondary: &[Token]) -> Vec<Vec<Token>> {
    secondary
        .iter()
        .map(|s| {
            vec![
                Token::glyph(zero),
                primary.clone(),
                s.clone(),
                primary.clone(),
                Token::glyph(zero),
            ]
        })
        .collect()
}

/// `m s1 m s2 m ... sn m`
fn single_punctuation_line(mark: &str, secondary: &[Token]) -> String {
    let mut tokens = vec![Token::char(mark)];
    for s in secondary {
        tokens.push(s.clone());
        tokens.push(Token::char(mark));
    }
    render_tokens(&tokens)
}

/// `open s1 s2 ... sn close`
fn paired_punctuation_line(open: &str, close: &str, secondary: &[Token]) -> String {
    let mut tokens = vec![Token::char(open)];
    tokens.extend(secondary.iter().cloned());
    tokens.push(Token::char(close));
    render_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<Token> {
        s.chars().map(|c| Token::char(c.to_string())).collect()
    }

    fn letters(s: &str) -> Vec<PrimaryToken> {
        s.chars().map(|c| PrimaryToken::Letter(c.to_string())).collect()
    }

    fn plan<'a>(primary: &'a [PrimaryToken], secondary: &'a [Token]) -> BlockPlan<'a> {
        BlockPlan {
            header: "P vs S".to_string(),
            primary,
            secondary,
            left: "X",
            right: "Y",
            layout: LineLayout::PerPrimary,
        }
    }

    #[test]
    fn test_letter_pairs_are_framed() {
        let primary = letters("AB");
        let secondary = chars("12");
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines, vec!["XA1AY XA2AY", "XB1BY XB2BY"]);
        assert_eq!(block.render(), "--- P vs S ---\nXA1AY XA2AY\nXB1BY XB2BY");
    }

    #[test]
    fn test_letter_mode_line_and_pair_counts() {
        let primary = letters("ABCD");
        let secondary = chars("xyz");
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines.len(), 4);
        assert!(block.lines.iter().all(|l| l.split(' ').count() == 3));
    }

    #[test]
    fn test_per_pair_layout() {
        let primary = letters("A");
        let secondary = chars("12");
        let mut plan = plan(&primary, &secondary);
        plan.layout = LineLayout::PerPair;
        let block = compose_block(&plan).unwrap();
        assert_eq!(block.lines, vec!["XA1AY", "XA2AY"]);
    }

    #[rstest]
    #[case("", "zero", "/zero /zero c /zero /zero")]
    #[case(".lf", "zero.lf", "/zero.lf /zero.lf c /zero.lf /zero.lf")]
    fn test_numeral_lines_use_glyph_names(
        #[case] suffix: &str,
        #[case] zero: &str,
        #[case] expected: &str,
    ) {
        let primary: Vec<PrimaryToken> = ["zero", "one"]
            .iter()
            .map(|n| PrimaryToken::Numeral {
                glyph: format!("{}{}", n, suffix),
                zero: zero.to_string(),
            })
            .collect();
        let secondary = chars("c");
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines[0], expected);
        assert_eq!(
            block.lines[1],
            format!("/{z} /one{s} c /one{s} /{z}", z = zero, s = suffix)
        );
    }

    #[test]
    fn test_paired_punctuation_wraps_once() {
        let primary = vec![PrimaryToken::punctuation("()")];
        let secondary = chars("abcdef");
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines, vec!["(abcdef)"]);
    }

    #[test]
    fn test_single_punctuation_alternates() {
        let primary = vec![PrimaryToken::punctuation("/"), PrimaryToken::punctuation(".")];
        let secondary = chars("ab");
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines, vec!["//a//b//", ".a.b."]);
    }

    #[test]
    fn test_punctuation_against_glyph_tokens() {
        let primary = vec![PrimaryToken::punctuation("[]")];
        let secondary = vec![Token::glyph("one.osf"), Token::glyph("two.osf")];
        let block = compose_block(&plan(&primary, &secondary)).unwrap();
        assert_eq!(block.lines, vec!["[ /one.osf /two.osf ]"]);
    }

    #[test]
    fn test_empty_secondary_gives_no_block() {
        let primary = letters("AB");
        assert_eq!(compose_block(&plan(&primary, &[])), None);
    }

    #[test]
    fn test_render_blocks_separates_with_blank_line() {
        let blocks = vec![
            OutputBlock {
                header: "a".to_string(),
                lines: vec!["1".to_string()],
            },
            OutputBlock {
                header: "b".to_string(),
                lines: vec!["2".to_string()],
            },
        ];
        assert_eq!(render_blocks(&blocks), "--- a ---\n1\n\n--- b ---\n2");
    }
}
