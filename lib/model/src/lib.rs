mod identifier;
mod pattern;
mod quad;

pub use identifier::Identifier;
pub use pattern::IdentifierQuadPattern;
pub use quad::IdentifierQuad;
