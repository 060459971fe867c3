pub mod gemini;
pub mod null;
