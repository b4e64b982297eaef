//! Agent and task definitions and prompt assembly.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A search result used as research notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page title
    pub title: String,
    /// Page URL
    pub link: String,
    /// Short excerpt
    #[serde(default)]
    pub snippet: String,
}

/// Readable text of a page linked from a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExcerpt {
    /// Title of the search result
    pub title: String,
    /// Page URL
    pub link: String,
    /// Plain text, whitespace collapsed
    pub text: String,
}

/// A role-playing agent: who the model should act as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Role name
    pub role: &'static str,
    /// What the agent is trying to achieve
    pub goal: &'static str,
    /// Background the agent works from
    pub backstory: &'static str,
}

/// A unit of work given to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Step-by-step instructions
    pub description: &'static str,
    /// What the answer must contain
    pub expected_output: &'static str,
}

/// Extra material appended verbatim after the task.
#[derive(Debug, Clone, Copy)]
pub enum ContextBlock<'a> {
    /// Output of an earlier task
    Prior {
        /// Role that produced it
        role: &'a str,
        /// The produced text
        text: &'a str,
    },
    /// Web search results
    Research(&'a [SearchHit]),
    /// Text scraped from result pages
    Pages(&'a [PageExcerpt]),
}

impl Agent {
    /// Builds the knowledge base and learning roadmap.
    pub const fn study_planner() -> Self {
        Self {
            role: "Study Planner",
            goal: "To build a comprehensive knowledge base and detailed learning roadmap for a \
                   given topic, catering to the user's specified understanding level {level}",
            backstory: "The user seeks to master complex concepts about {topic}. \
                        They require an in-depth guide that covers fundamental concepts, advanced \
                        techniques, and recent developments. \
                        The solution must begin with first principles, ensuring clarity for \
                        beginners while still offering depth for experienced learners. \
                        The roadmap should enable learners to progress from foundational knowledge \
                        to expert-level mastery in a structured and logical way. \
                        The user has access to web search and page content extraction, ensuring \
                        access to updated information. \
                        Your work is the basis for the Content Writer to create study material.",
        }
    }

    /// Turns the roadmap into study material with curated resources.
    pub const fn content_writer() -> Self {
        Self {
            role: "Content Writer",
            goal: "The goal is to create a comprehensive, well-structured study material for a \
                   given topic: {topic} that aligns with the provided content outline. The final \
                   content should include a curated list of high-quality learning resources, with \
                   clear descriptions and reference links for each.",
            backstory: "The user aims to create a structured and engaging study guide for \
                        learners seeking in-depth knowledge about a particular {topic}. \
                        The Content Planner outlines the key objectives and learning path, \
                        ensuring the material aligns with educational goals. \
                        The user has access to web search and website content, which the agent \
                        can leverage to fetch updated and credible learning resources.",
        }
    }

    /// Writes exercises, projects and scenarios that follow a roadmap.
    pub const fn exercise_creator() -> Self {
        Self {
            role: "Exercise Creator",
            goal: "The goal is to create comprehensive and engaging practice materials for a given \
                   topic, ensuring they align with a structured roadmap :{plan}. The materials \
                   should include a variety of exercises, quizzes, hands-on projects, and \
                   real-world application scenarios. Detailed solutions and explanations must be \
                   provided for all practice materials to facilitate learning and self-assessment.",
            backstory: "As part of an educational initiative, there is a need to develop \
                        high-quality practice materials for learners studying a specific topic : \
                        {topic}. These materials should not only reinforce theoretical knowledge \
                        but also provide practical, real-world applications to enhance \
                        understanding and retention. The materials must be progressive, starting \
                        from foundational concepts and advancing to more complex problems and \
                        projects. To ensure relevance and accuracy, the materials will be sourced \
                        and validated using web search.",
        }
    }
}

impl TaskSpec {
    /// Planner task: knowledge base and progressive roadmap.
    pub const fn plan() -> Self {
        Self {
            description: "1. Create the Knowledge Base: Start from first principles and explain \
core concepts about {topic} with clear definitions and examples. Introduce key terminology, core \
principles, and relevant frameworks. Cover practical applications, best practices, and emerging trends.
2. Identify user's familiarity level {level}, and generate plan according to that
3. Break the topic into logical subtopics. Structure the subtopics in a progressive order, starting \
with fundamentals and advancing to expert-level concepts. Recommend resources such as books, \
articles, video tutorials, and interactive exercises.
4. Gather updated information from trusted sources to ensure content reflects the latest trends, \
research, and advancements about {topic}",
            expected_output: "A comprehensive study plan. \
Detailed explanations of core concepts, key terminology, frameworks, and best practices. \
A structured progression of topics, divided into foundational, intermediate, and advanced levels.",
        }
    }

    /// Writer task: study material following the plan.
    pub const fn write() -> Self {
        Self {
            description: "1. Write new study material about {topic} that aligns with the provided \
content outline and context shared by the Content Planner. Maintain clarity, coherence, and \
educational value in the content.
2. Use the web search results to search for technical blogs, GitHub repositories, official \
documentation, video tutorials, and courses. Use the website content to fetch additional in-depth \
resources if needed.
3. Organize resources in a well-structured format. Each entry should include: \
Title/Name of the resource. \
A brief description explaining its relevance and key takeaways. \
A direct link for easy access.
4. Present the content in a clean, professional, and organized structure. Use headings, bullet \
points, and clear descriptions to improve readability.",
            expected_output: "A well-written study material. \
A detailed study material aligned with the content outline. \
A well-curated list of resources for deeper learning. \
Each resource should include a clear description and reference link. Content should be presented \
neatly with clear formatting (e.g., headings, bullet points, and structured paragraphs). DO NOT \
MENTION TOOL NAME IN YOUR RESPONSE. \
IMPORTANT, MAKE SURE OUTPUT SHOULD BE IN PROPER MARKDOWN FORMAT",
        }
    }

    /// Exercise task: practice material for the whole roadmap.
    pub const fn exercises() -> Self {
        Self {
            description: "1. Progressive Exercises: A series of exercises that start with basic \
concepts and gradually increase in complexity.
2. Hands-on Projects: Practical projects that require application of the topic in real-world scenarios.
3. Real-world Application Scenarios: Case studies or examples that demonstrate how the topic is \
applied in real-world situations.
4. The materials should be aligned with a structured roadmap progression, ensuring that learners \
can follow a logical path from basic to advanced concepts. Web search will help in finding example \
problems, real-world applications, and relevant content to include in the practice materials.",
            expected_output: "Progressive Exercises: A document or set of documents containing a \
series of exercises, starting from basic to advanced levels. \
Hands-on Projects: Detailed project descriptions and guidelines for hands-on projects, including \
expected outcomes and evaluation criteria. \
Real-world Application Scenarios: Case studies or examples demonstrating real-world applications \
of the topic, with explanations. \
The final output should be well-organized, easy to follow, and tailored to the given topic, \
ensuring that learners can effectively practice and apply their knowledge. \
DO NOT WORRY ABOUT TIME TAKEN and LENGTH Constraint, PROVIDE EXERCISES for complete roadmap and \
DO NOT MENTION tool names",
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

/// Replace `{name}` placeholders with values.
///
/// Substituted values are not scanned again, so they may contain braces.
/// A placeholder with no matching variable is an error.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = vars
            .iter()
            .find(|(key, _)| *key == name.as_str())
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                Error::Template(format!("unknown placeholder {{{}}}", name.as_str()))
            })?;
        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

fn markup_regexes() -> &'static [Regex; 3] {
    static MARKUP: OnceLock<[Regex; 3]> = OnceLock::new();
    MARKUP.get_or_init(|| {
        [
            Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>").unwrap(),
            Regex::new(r"(?s)<[^>]*>").unwrap(),
            Regex::new(r"&(amp|lt|gt|quot|apos|nbsp|#39);").unwrap(),
        ]
    })
}

/// Reduce an HTML or plain text page body to readable text.
///
/// Comments, scripts and styles are dropped, remaining tags become spaces,
/// common entities are decoded and whitespace runs collapse to one space.
pub fn page_text(body: &str) -> String {
    let [hidden, tags, entities] = markup_regexes();
    let text = hidden.replace_all(body, " ");
    let text = tags.replace_all(&text, " ");
    let text = entities.replace_all(&text, |caps: &regex::Captures| {
        match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "nbsp" => " ",
            _ => "'",
        }
        .to_string()
    });
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assemble the full prompt for an agent working on a task.
pub fn compose(
    agent: &Agent,
    task: &TaskSpec,
    vars: &[(&str, &str)],
    context: &[ContextBlock<'_>],
) -> Result<String> {
    let mut prompt = format!(
        "You are the {}.\n\nYour goal: {}\n\nBackground: {}\n\n# Task\n{}\n\n# Expected output\n{}\n",
        agent.role,
        interpolate(agent.goal, vars)?,
        interpolate(agent.backstory, vars)?,
        interpolate(task.description, vars)?,
        interpolate(task.expected_output, vars)?,
    );

    for block in context {
        match block {
            ContextBlock::Prior { role, text } => {
                prompt.push_str(&format!("\n# Context from the {}\n{}\n", role, text.trim()));
            }
            ContextBlock::Research(hits) if !hits.is_empty() => {
                prompt.push_str("\n# Research notes\n");
                for hit in hits.iter() {
                    prompt.push_str(&format!("- {} ({}): {}\n", hit.title, hit.link, hit.snippet));
                }
            }
            ContextBlock::Research(_) => {}
            ContextBlock::Pages(pages) if !pages.is_empty() => {
                prompt.push_str("\n# Page excerpts\n");
                for page in pages.iter() {
                    prompt.push_str(&format!("\n{} ({})\n{}\n", page.title, page.link, page.text));
                }
            }
            ContextBlock::Pages(_) => {}
        }
    }

    Ok(prompt)
}
