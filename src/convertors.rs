#[cfg(feature = "glyphs")]
pub mod glyphs3;
#[cfg(feature = "ufo")]
pub mod ufo;
