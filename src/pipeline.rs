//! End-to-end study plan generation.
//!
//! Asks a [`StudyCrew`] for the roadmap, lays it out and exports it, then
//! asks for the assessment built on that roadmap and does the same.
//!
//! # Example
//!
//! ```no_run
//! use studypdf::crew::{LanguageModel, PromptCrew, SearchTool};
//! use studypdf::pipeline::StudyPipeline;
//! use studypdf::{Level, StudyConfig};
//!
//! fn plan<M: LanguageModel, S: SearchTool>(model: M, search: S) -> studypdf::Result<()> {
//!     let config = StudyConfig::new("LoRA")
//!         .with_gemini_key("...")
//!         .with_serper_key("...")
//!         .with_level(Level::Beginner);
//!
//!     let output = StudyPipeline::new(PromptCrew::new(model, search)).run(&config)?;
//!     output.roadmap.save("out")?;
//!     output.assessment.save("out")?;
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::crew::StudyCrew;
use crate::error::Result;
use crate::export::{to_pdf, PdfOptions};
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::model::Document;

/// Default file name of the roadmap PDF.
pub const ROADMAP_FILE: &str = "Study_Guide.pdf";

/// Default file name of the assessment PDF.
pub const ASSESSMENT_FILE: &str = "Assessment.pdf";

/// One generated document in every form the pipeline produces.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Document title written to the PDF metadata
    pub title: String,

    /// Text returned by the crew
    pub markdown: String,

    /// Laid-out pages
    pub document: Document,

    /// Serialized PDF
    pub pdf: Vec<u8>,

    /// Suggested PDF file name
    pub file_name: String,
}

impl Artifact {
    /// Write the PDF into a directory, creating it if needed.
    ///
    /// Returns the path of the written file.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.pdf)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.pdf.len());
        Ok(path)
    }

    /// Number of pages in the laid-out document.
    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }
}

/// Both documents produced for a topic.
#[derive(Debug, Clone)]
pub struct StudyOutput {
    /// Study roadmap and material
    pub roadmap: Artifact,

    /// Exercises, projects and scenarios
    pub assessment: Artifact,
}

/// Runs a crew and renders what it writes.
#[derive(Debug, Clone)]
pub struct StudyPipeline<C> {
    crew: C,
    layout: LayoutOptions,
    pdf: PdfOptions,
    roadmap_file: String,
    assessment_file: String,
}

impl<C: StudyCrew> StudyPipeline<C> {
    /// Create a pipeline with default layout and PDF options.
    pub fn new(crew: C) -> Self {
        Self {
            crew,
            layout: LayoutOptions::default(),
            pdf: PdfOptions::default(),
            roadmap_file: ROADMAP_FILE.to_string(),
            assessment_file: ASSESSMENT_FILE.to_string(),
        }
    }

    /// Set layout options.
    pub fn with_layout(mut self, options: LayoutOptions) -> Self {
        self.layout = options;
        self
    }

    /// Set PDF options.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf = options;
        self
    }

    /// Set the output file names.
    pub fn with_file_names(
        mut self,
        roadmap: impl Into<String>,
        assessment: impl Into<String>,
    ) -> Self {
        self.roadmap_file = roadmap.into();
        self.assessment_file = assessment.into();
        self
    }

    /// Get the crew.
    pub fn crew(&self) -> &C {
        &self.crew
    }

    /// Generate, lay out and export the roadmap and the assessment.
    pub fn run(&self, config: &StudyConfig) -> Result<StudyOutput> {
        config.validate()?;
        let topic = config.topic();

        log::info!("Generating {} roadmap for '{}'", config.level, topic);
        let plan = self.crew.produce_document(topic, config.level)?;
        let roadmap = self.artifact(
            format!("{} Study Guide", topic),
            plan,
            &self.roadmap_file,
        )?;

        log::info!("Generating assessment for '{}'", topic);
        let exercises = self.crew.produce_assessment(topic, &roadmap.markdown)?;
        let assessment = self.artifact(
            format!("{} Assessment", topic),
            exercises,
            &self.assessment_file,
        )?;

        Ok(StudyOutput {
            roadmap,
            assessment,
        })
    }

    fn artifact(&self, title: String, markdown: String, file_name: &str) -> Result<Artifact> {
        let engine = LayoutEngine::new(self.layout.clone().with_title(title.as_str()));
        let document = engine.render(&markdown);
        let pdf = to_pdf(&document, &self.pdf)?;
        log::info!(
            "Rendered '{}' to {} pages ({} bytes)",
            title,
            document.page_count(),
            pdf.len()
        );

        Ok(Artifact {
            title,
            markdown,
            document,
            pdf,
            file_name: file_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Level;
    use crate::error::Error;
    use std::cell::RefCell;

    #[derive(Default)]
    struct ScriptedCrew {
        calls: RefCell<Vec<String>>,
    }

    impl StudyCrew for ScriptedCrew {
        fn produce_document(&self, topic: &str, level: Level) -> Result<String> {
            self.calls.borrow_mut().push(format!("document:{}:{}", topic, level));
            Ok(format!("# {}\n- first step\nSome body text.", topic))
        }

        fn produce_assessment(&self, topic: &str, plan_text: &str) -> Result<String> {
            self.calls
                .borrow_mut()
                .push(format!("assessment:{}:{}", topic, plan_text.lines().count()));
            Ok("## Exercises\n- one\n- two".to_string())
        }
    }

    fn config() -> StudyConfig {
        StudyConfig::new("  LoRA ")
            .with_gemini_key("g")
            .with_serper_key("s")
            .with_level(Level::Advance)
    }

    #[test]
    fn test_run_calls_crew_in_order() {
        let crew = ScriptedCrew::default();
        let pipeline = StudyPipeline::new(&crew);
        let output = pipeline.run(&config()).unwrap();

        assert_eq!(
            *crew.calls.borrow(),
            vec!["document:LoRA:Advance", "assessment:LoRA:3"]
        );
        assert_eq!(output.roadmap.file_name, ROADMAP_FILE);
        assert_eq!(output.assessment.file_name, ASSESSMENT_FILE);
        assert_eq!(output.roadmap.title, "LoRA Study Guide");
        assert_eq!(
            output.roadmap.document.metadata.title.as_deref(),
            Some("LoRA Study Guide")
        );
        assert!(output.roadmap.pdf.starts_with(b"%PDF-1.4"));
        assert_eq!(output.assessment.document.run_count(), 3);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let crew = ScriptedCrew::default();
        let config = StudyConfig::new("LoRA").with_serper_key("s");
        let err = StudyPipeline::new(&crew).run(&config).unwrap_err();

        assert!(matches!(err, Error::MissingCredential(_)));
        assert!(crew.calls.borrow().is_empty());
    }

    #[test]
    fn test_save_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let output = StudyPipeline::new(ScriptedCrew::default())
            .with_file_names("plan.pdf", "quiz.pdf")
            .run(&config())
            .unwrap();

        let path = output.roadmap.save(dir.path().join("nested")).unwrap();
        assert!(path.ends_with("nested/plan.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), output.roadmap.pdf);
    }
}
