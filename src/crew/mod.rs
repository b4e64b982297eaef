//! Study crew: the collaborator that writes roadmap and assessment text.
//!
//! The rest of the crate only sees [`StudyCrew`]. [`PromptCrew`] is the
//! bundled implementation: a fixed sequence of role prompts sent to a
//! [`LanguageModel`], with research notes from a [`SearchTool`] and, when a
//! [`PageFetcher`] is attached, text scraped from the top result pages.
//! Concrete HTTP clients live in the command-line crate.
//!
//! # Example
//!
//! ```
//! use studypdf::crew::{LanguageModel, PromptCrew, SearchHit, SearchTool, StudyCrew};
//! use studypdf::Level;
//!
//! struct Echo;
//!
//! impl LanguageModel for Echo {
//!     fn generate(&self, _model: &str, _prompt: &str) -> studypdf::Result<String> {
//!         Ok("# Roadmap".to_string())
//!     }
//! }
//!
//! struct NoSearch;
//!
//! impl SearchTool for NoSearch {
//!     fn search(&self, _query: &str) -> studypdf::Result<Vec<SearchHit>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let crew = PromptCrew::new(Echo, NoSearch);
//! let plan = crew.produce_document("LoRA", Level::Beginner)?;
//! assert_eq!(plan, "# Roadmap");
//! # Ok::<(), studypdf::Error>(())
//! ```

pub mod prompt;

pub use prompt::{compose, interpolate, page_text, Agent, ContextBlock, PageExcerpt, SearchHit, TaskSpec};

use crate::config::Level;
use crate::error::{Error, Result};

/// Produces the study documents for a topic.
pub trait StudyCrew {
    /// Write the study roadmap and material for a topic at a level.
    fn produce_document(&self, topic: &str, level: Level) -> Result<String>;

    /// Write practice material that follows a roadmap.
    fn produce_assessment(&self, topic: &str, plan_text: &str) -> Result<String>;
}

/// A text generation backend.
pub trait LanguageModel {
    /// Generate a completion for a prompt with the named model.
    fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// A web search backend.
pub trait SearchTool {
    /// Search the web and return the top results.
    fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Downloads web pages for scraping.
pub trait PageFetcher {
    /// Fetch the body of a page, HTML or plain text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// A fetcher that never scrapes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetch;

impl PageFetcher for NoFetch {
    fn fetch(&self, _url: &str) -> Result<String> {
        Ok(String::new())
    }
}

impl<T: StudyCrew + ?Sized> StudyCrew for &T {
    fn produce_document(&self, topic: &str, level: Level) -> Result<String> {
        (**self).produce_document(topic, level)
    }

    fn produce_assessment(&self, topic: &str, plan_text: &str) -> Result<String> {
        (**self).produce_assessment(topic, plan_text)
    }
}

impl<T: LanguageModel + ?Sized> LanguageModel for &T {
    fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        (**self).generate(model, prompt)
    }
}

impl<T: SearchTool + ?Sized> SearchTool for &T {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        (**self).search(query)
    }
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Model names used by each agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewModels {
    /// Study Planner model
    pub planner: String,
    /// Content Writer model
    pub writer: String,
    /// Exercise Creator model
    pub exercises: String,
}

impl Default for CrewModels {
    fn default() -> Self {
        Self {
            planner: "gemini/gemini-2.0-flash-exp".to_string(),
            writer: "gemini/gemini-1.5-flash".to_string(),
            exercises: "gemini/gemini-1.5-flash".to_string(),
        }
    }
}

/// Research gathered for one task.
#[derive(Debug)]
struct Research {
    hits: Vec<SearchHit>,
    pages: Vec<PageExcerpt>,
}

impl Research {
    fn context(&self) -> [ContextBlock<'_>; 2] {
        [
            ContextBlock::Research(&self.hits),
            ContextBlock::Pages(&self.pages),
        ]
    }
}

/// Runs the planner, writer and exercise prompts in sequence.
#[derive(Debug, Clone)]
pub struct PromptCrew<M, S, F = NoFetch> {
    model: M,
    search: S,
    fetcher: F,
    models: CrewModels,
    max_hits: usize,
    max_pages: usize,
    page_chars: usize,
}

impl<M: LanguageModel, S: SearchTool> PromptCrew<M, S> {
    /// Create a crew with the default models and no page scraping.
    pub fn new(model: M, search: S) -> Self {
        Self {
            model,
            search,
            fetcher: NoFetch,
            models: CrewModels::default(),
            max_hits: 5,
            max_pages: 2,
            page_chars: 3000,
        }
    }
}

impl<M: LanguageModel, S: SearchTool, F: PageFetcher> PromptCrew<M, S, F> {
    /// Scrape the top result pages with a fetcher.
    pub fn with_fetcher<G: PageFetcher>(self, fetcher: G) -> PromptCrew<M, S, G> {
        PromptCrew {
            model: self.model,
            search: self.search,
            fetcher,
            models: self.models,
            max_hits: self.max_hits,
            max_pages: self.max_pages,
            page_chars: self.page_chars,
        }
    }

    /// Set the model names.
    pub fn with_models(mut self, models: CrewModels) -> Self {
        self.models = models;
        self
    }

    /// Set how many search results go into each prompt.
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Set how many result pages are scraped per search and how many
    /// characters of each are kept.
    pub fn with_page_limits(mut self, max_pages: usize, page_chars: usize) -> Self {
        self.max_pages = max_pages;
        self.page_chars = page_chars;
        self
    }

    /// Get the model names.
    pub fn models(&self) -> &CrewModels {
        &self.models
    }

    /// Search results and scraped pages for a query. A failing search or
    /// fetch leaves that material out instead of failing the task.
    fn research(&self, query: &str) -> Research {
        let hits = match self.search.search(query) {
            Ok(mut hits) => {
                hits.truncate(self.max_hits);
                log::debug!("Search '{}' returned {} results", query, hits.len());
                hits
            }
            Err(e) => {
                log::warn!("Search '{}' failed, continuing without notes: {}", query, e);
                Vec::new()
            }
        };
        let pages = hits
            .iter()
            .take(self.max_pages)
            .filter_map(|hit| self.scrape(hit))
            .collect();
        Research { hits, pages }
    }

    fn scrape(&self, hit: &SearchHit) -> Option<PageExcerpt> {
        let body = match self.fetcher.fetch(&hit.link) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Skipping page {}: {}", hit.link, e);
                return None;
            }
        };
        let mut text = page_text(&body);
        if text.is_empty() {
            return None;
        }
        if let Some((cut, _)) = text.char_indices().nth(self.page_chars) {
            text.truncate(cut);
        }
        log::debug!("Scraped {} bytes of text from {}", text.len(), hit.link);
        Some(PageExcerpt {
            title: hit.title.clone(),
            link: hit.link.clone(),
            text,
        })
    }

    fn run_task(
        &self,
        agent: &Agent,
        task: &TaskSpec,
        model: &str,
        vars: &[(&str, &str)],
        context: &[ContextBlock<'_>],
    ) -> Result<String> {
        let prompt = compose(agent, task, vars, context)?;
        log::info!("Running {} task with {}", agent.role, model);
        let output = self.model.generate(model, &prompt)?;
        let output = output.trim();
        if output.is_empty() {
            return Err(Error::Provider(format!(
                "{} returned an empty response",
                agent.role
            )));
        }
        Ok(output.to_string())
    }
}

impl<M: LanguageModel, S: SearchTool, F: PageFetcher> StudyCrew for PromptCrew<M, S, F> {
    fn produce_document(&self, topic: &str, level: Level) -> Result<String> {
        let level = level.as_str();
        let vars = [("topic", topic), ("level", level)];

        let research = self.research(&format!("{} {} learning roadmap", topic, level));
        let planner = Agent::study_planner();
        let plan = self.run_task(
            &planner,
            &TaskSpec::plan(),
            &self.models.planner,
            &vars,
            &research.context(),
        )?;

        let research = self.research(&format!(
            "{} tutorials courses official documentation",
            topic
        ));
        let [hits, pages] = research.context();
        self.run_task(
            &Agent::content_writer(),
            &TaskSpec::write(),
            &self.models.writer,
            &vars,
            &[
                ContextBlock::Prior {
                    role: planner.role,
                    text: &plan,
                },
                hits,
                pages,
            ],
        )
    }

    fn produce_assessment(&self, topic: &str, plan_text: &str) -> Result<String> {
        let vars = [("topic", topic), ("plan", plan_text)];
        let research = self.research(&format!(
            "{} practice exercises projects case studies",
            topic
        ));
        self.run_task(
            &Agent::exercise_creator(),
            &TaskSpec::exercises(),
            &self.models.exercises,
            &vars,
            &research.context(),
        )
    }
}
