//! Batch runner that drives every document through the analyzer.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::{Analyzer, BatchResult, Document, DocumentMetrics, DocumentSource, SkipReason};

/// Executes analysis for every document in a source.
pub struct Runner<'a> {
    analyzer: Analyzer<'a>,
    parallel: bool,
    show_progress: bool,
}

impl<'a> Runner<'a> {
    /// Create a new runner. Parallel, without a progress bar.
    pub fn new(analyzer: Analyzer<'a>) -> Self {
        Self {
            analyzer,
            parallel: true,
            show_progress: false,
        }
    }

    /// Set whether documents are analyzed across threads.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether to draw a progress bar on stderr.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Analyze every document the source lists.
    ///
    /// Per-document failures are recorded as skips. Only a failure to list
    /// the source's identifiers is returned as an error.
    pub fn run(&self, source: &dyn DocumentSource) -> anyhow::Result<BatchResult> {
        let ids = source.identifiers()?;
        let progress = self.progress_bar(ids.len() as u64);

        let outcomes: Vec<(String, Result<DocumentMetrics, SkipReason>)> = if self.parallel {
            ids.into_par_iter()
                .map(|id| {
                    let outcome = self.process(source, &id);
                    progress.inc(1);
                    (id, outcome)
                })
                .collect()
        } else {
            ids.into_iter()
                .map(|id| {
                    let outcome = self.process(source, &id);
                    progress.inc(1);
                    (id, outcome)
                })
                .collect()
        };
        progress.finish_and_clear();

        let mut result = BatchResult::new();
        for (id, outcome) in outcomes {
            if let Err(reason) = &outcome {
                tracing::warn!(id = %id, reason = %reason, "document skipped");
            }
            result.record(&id, outcome);
        }
        result.sort();

        tracing::info!(
            attempted = result.attempted,
            succeeded = result.succeeded(),
            failed = result.failed(),
            "batch analysis finished"
        );
        Ok(result)
    }

    fn process(
        &self,
        source: &dyn DocumentSource,
        id: &str,
    ) -> Result<DocumentMetrics, SkipReason> {
        let text = source.fetch(id)?;
        self.analyzer.analyze(&Document::new(id, text))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("Analyzing documents");
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{FetchError, MemorySource};
    use crate::lexicon::Lexicon;
    use crate::text::{RuleLemmatizer, SentenceSegmenter};

    /// A source whose listed documents cannot all be fetched.
    struct FlakySource;

    impl DocumentSource for FlakySource {
        fn identifiers(&self) -> anyhow::Result<Vec<String>> {
            Ok(vec!["ok".to_string(), "broken".to_string()])
        }

        fn fetch(&self, id: &str) -> Result<String, FetchError> {
            match id {
                "ok" => Ok("A good day.".to_string()),
                _ => Err(FetchError::NotFound(id.to_string())),
            }
        }
    }

    fn fixtures() -> (Lexicon, RuleLemmatizer, SentenceSegmenter) {
        (
            Lexicon::from_words(["good"], ["bad"]),
            RuleLemmatizer::new(),
            SentenceSegmenter::new(),
        )
    }

    #[test]
    fn test_runner_isolates_failures() {
        let (lexicon, lemmatizer, segmenter) = fixtures();
        let source = MemorySource::new()
            .with("1", "Good work. Bad luck.")
            .with("2", "12345 !!!")
            .with("3", "Nothing remarkable here.");

        for parallel in [true, false] {
            let runner = Runner::new(Analyzer::new(&lexicon, &lemmatizer, &segmenter))
                .parallel(parallel);
            let result = runner.run(&source).unwrap();

            assert_eq!(result.attempted, 3);
            assert_eq!(result.succeeded(), 2);
            assert_eq!(result.failed(), 1);
            assert_eq!(result.skipped[0].id, "2");
            assert_eq!(result.skipped[0].reason, SkipReason::NoValidWords);
            assert_eq!(result.analyzed[0].id, "1");
            assert_eq!(result.analyzed[1].id, "3");
        }
    }

    #[test]
    fn test_runner_records_fetch_failures() {
        let (lexicon, lemmatizer, segmenter) = fixtures();
        let runner = Runner::new(Analyzer::new(&lexicon, &lemmatizer, &segmenter));
        let result = runner.run(&FlakySource).unwrap();

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded(), 1);
        assert!(matches!(result.skipped[0].reason, SkipReason::Fetch(_)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (lexicon, lemmatizer, segmenter) = fixtures();
        let mut source = MemorySource::new();
        for i in 0..20 {
            source.insert(
                format!("{:02}", i),
                "Good results were reported. Some bad news followed. ".repeat(i + 1),
            );
        }

        let analyzer = || Analyzer::new(&lexicon, &lemmatizer, &segmenter);
        let par = Runner::new(analyzer()).parallel(true).run(&source).unwrap();
        let seq = Runner::new(analyzer()).parallel(false).run(&source).unwrap();
        assert_eq!(par.analyzed, seq.analyzed);
    }
}
