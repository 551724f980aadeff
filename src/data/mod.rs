pub mod score_data;
pub mod persistence;

pub use score_data::{ScoreArray, ScoreData, ScoreDataError};
pub use persistence::{ScoreDataHeader, FORMAT_VERSION};
