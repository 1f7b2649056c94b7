//! Pipeline runner — orchestrates stage execution.
//!
//! [`TextPipeline::transform`] runs the stages in a fixed order:
//!
//! 1. Concatenate title and description
//! 2. Clean (lowercase, strip punctuation)
//! 3. Tokenize
//! 4. Lemmatize
//! 5. Remove stopwords
//! 6. Custom preprocessor hook
//!
//! and joins the surviving lemmas into a [`ProcessedText`]. The same pipeline
//! is used for training and for prediction.

use crate::nlp::cleaner::clean_text;
use crate::nlp::lemmatizer::Lemmatizer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::artifacts::{ProcessedText, TokenStream};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_CLEAN, STAGE_LEMMATIZE,
    STAGE_PREPROCESS, STAGE_STOPWORDS, STAGE_TOKENIZE,
};
use crate::pipeline::traits::{NoopPreprocessor, Preprocessor};
use crate::types::ClassifierConfig;

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Preprocessing pipeline, generic over the final custom stage.
#[derive(Debug, Clone)]
pub struct TextPipeline<Pre = NoopPreprocessor> {
    pub tokenizer: Tokenizer,
    pub lemmatizer: Lemmatizer,
    pub stopwords: StopwordFilter,
    pub preprocessor: Pre,
    cfg: ClassifierConfig,
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl TextPipeline {
    /// Build the standard pipeline for `cfg.language`.
    pub fn new(cfg: ClassifierConfig) -> Self {
        TextPipeline {
            tokenizer: Tokenizer::new(),
            lemmatizer: Lemmatizer::new(),
            stopwords: StopwordFilter::new(&cfg.language),
            preprocessor: NoopPreprocessor,
            cfg,
        }
    }
}

impl<Pre> TextPipeline<Pre> {
    /// Replace the custom preprocessor stage.
    pub fn with_preprocessor<P: Preprocessor>(self, preprocessor: P) -> TextPipeline<P> {
        TextPipeline {
            tokenizer: self.tokenizer,
            lemmatizer: self.lemmatizer,
            stopwords: self.stopwords,
            preprocessor,
            cfg: self.cfg,
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Lemmatizer) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.cfg
    }
}

impl<Pre: Preprocessor> TextPipeline<Pre> {
    /// Transform a title and description into normalized text.
    pub fn transform(&self, title: &str, description: &str) -> ProcessedText {
        self.transform_observed(title, description, &mut NoopObserver)
    }

    /// Like [`transform`](Self::transform), notifying `observer` at every
    /// stage boundary.
    pub fn transform_observed(
        &self,
        title: &str,
        description: &str,
        observer: &mut impl PipelineObserver,
    ) -> ProcessedText {
        let combined = [title, description].join(" ");

        trace_stage!(STAGE_CLEAN);
        observer.on_stage_start(STAGE_CLEAN);
        let clock = StageClock::start();
        let cleaned = clean_text(&combined);
        observer.on_stage_end(STAGE_CLEAN, &StageReport::new(clock.elapsed(), 0, 0));

        trace_stage!(STAGE_TOKENIZE);
        observer.on_stage_start(STAGE_TOKENIZE);
        let clock = StageClock::start();
        let mut tokens = self.tokenizer.tokenize(&cleaned);
        let produced = tokens.len();
        observer.on_stage_end(
            STAGE_TOKENIZE,
            &StageReport::new(clock.elapsed(), 0, produced),
        );

        trace_stage!(STAGE_LEMMATIZE);
        observer.on_stage_start(STAGE_LEMMATIZE);
        let clock = StageClock::start();
        self.lemmatizer.lemmatize_tokens(&mut tokens);
        observer.on_stage_end(
            STAGE_LEMMATIZE,
            &StageReport::new(clock.elapsed(), produced, tokens.len()),
        );

        trace_stage!(STAGE_STOPWORDS);
        observer.on_stage_start(STAGE_STOPWORDS);
        let clock = StageClock::start();
        let before = tokens.len();
        let mut stream = TokenStream::from_tokens(self.stopwords.filter_tokens(tokens));
        observer.on_stage_end(
            STAGE_STOPWORDS,
            &StageReport::new(clock.elapsed(), before, stream.len()),
        );

        trace_stage!(STAGE_PREPROCESS);
        observer.on_stage_start(STAGE_PREPROCESS);
        let clock = StageClock::start();
        let before = stream.len();
        self.preprocessor.preprocess(&mut stream, &self.cfg);
        observer.on_stage_end(
            STAGE_PREPROCESS,
            &StageReport::new(clock.elapsed(), before, stream.len()),
        );
        observer.on_tokens(&stream);

        ProcessedText::from_stream(stream)
    }
}

/// Apply the default English pipeline and return the joined lemmas.
pub fn transform_text(title: &str, description: &str) -> String {
    TextPipeline::default().transform(title, description).text
}
