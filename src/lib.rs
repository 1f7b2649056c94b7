//! # movie-genre-classifier
//!
//! Predict a movie's genres from its title and description.
//!
//! Text goes through a fixed preprocessing pipeline (clean, tokenize,
//! lemmatize, drop stopwords), is vectorized with TF-IDF, and scored by a
//! one-vs-rest logistic regression. Every genre whose probability reaches the
//! threshold is returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use movie_genre_classifier::{ClassifierConfig, GenreModel, GenrePredictor};
//!
//! let model = GenreModel::load("model/genre_model.json")?;
//! let predictor = GenrePredictor::new(model, ClassifierConfig::default())?;
//! let prediction = predictor.predict(
//!     "Avengers",
//!     "Earth's mightiest heroes must come together to stop Loki.",
//! )?;
//! println!("{:?}", prediction.genre);
//! # Ok::<(), movie_genre_classifier::ClassifierError>(())
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod pipeline;
pub mod predict;
pub mod types;

pub use error::{ClassifierError, Result};
pub use model::train::{Trainer, TrainingExample, TrainOptions};
pub use model::GenreModel;
pub use pipeline::runner::{transform_text, TextPipeline};
pub use predict::{resolve_threshold, select_genres, GenrePredictor};
pub use types::{ClassifierConfig, GenreScore, Prediction, Token};
