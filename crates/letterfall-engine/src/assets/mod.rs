pub mod tones;
