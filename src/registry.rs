//! Built-in dimension and model catalogs.
//!
//! Both tables describe the published DramaBench release and serve as
//! defaults: `.dramabench.toml` can replace either wholesale without
//! touching the aggregation code. Adding a dimension is a data change,
//! not a code change.

use serde::{Deserialize, Serialize};

/// How a dimension's metric values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvalKind {
    /// Deterministic checkers over the script text.
    RuleBased,
    /// Labels assigned by an LLM judge.
    LlmLabeled,
}

impl Default for EvalKind {
    fn default() -> Self {
        EvalKind::LlmLabeled
    }
}

/// One evaluation dimension: where its metric table lives and which
/// column ranks models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Stable identifier, lowercase with underscores.
    pub id: String,

    /// Key metric column used for scoring and ranking.
    pub metric: String,

    /// Table file name under the data directory. Defaults to
    /// `{id}_metrics.csv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// One-line description surfaced in the statistics document.
    #[serde(default)]
    pub description: String,

    /// Labeling method.
    #[serde(default)]
    pub kind: EvalKind,

    /// Human-readable metric names surfaced by the dashboard.
    #[serde(default)]
    pub key_metrics: Vec<String>,
}

impl DimensionSpec {
    /// File name of the dimension's metric table.
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("{}_metrics.csv", self.id))
    }

    /// Display name derived from the identifier
    /// (`emotional_depth` becomes `Emotional Depth`).
    pub fn display_name(&self) -> String {
        title_case(&self.id)
    }
}

/// One entry of the model catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Identifier as it appears in the metric tables.
    pub id: String,
    /// Display name shown on the leaderboard.
    pub name: String,
    /// Vendor name.
    pub provider: String,
    /// One-line description surfaced in the statistics document.
    #[serde(default)]
    pub description: String,
}

/// The six shipped evaluation dimensions, in dashboard order.
pub fn default_dimensions() -> Vec<DimensionSpec> {
    vec![
        dimension(
            "format_standards",
            "format_error_rate",
            EvalKind::RuleBased,
            "Adherence to screenplay format (Fountain syntax)",
            &[
                "Format Error Rate",
                "Novelization Index",
                "Dialogue-Action Ratio",
            ],
        ),
        dimension(
            "narrative_efficiency",
            "enr",
            EvalKind::LlmLabeled,
            "Story progression effectiveness and pacing",
            &["Effective Narrative Rate", "Beats Per Page"],
        ),
        dimension(
            "character_consistency",
            "ooc_rate",
            EvalKind::LlmLabeled,
            "Character voice and behavior consistency",
            &["Out-of-Character Rate", "Voice Distinctiveness"],
        ),
        dimension(
            "emotional_depth",
            "emotional_depth_score",
            EvalKind::LlmLabeled,
            "Emotional arc development and complexity",
            &["Arc Score", "Complexity Ratio"],
        ),
        dimension(
            "logic_consistency",
            "logic_break_rate",
            EvalKind::LlmLabeled,
            "Factual coherence and logical continuity",
            &["Logic Break Rate", "Context Coherence"],
        ),
        dimension(
            "conflict_handling",
            "score_weight",
            EvalKind::LlmLabeled,
            "Conflict development and resolution quality",
            &["Conflict Score", "Drop Rate"],
        ),
    ]
}

/// The evaluated models with display names and providers.
pub fn model_catalog() -> Vec<ModelEntry> {
    vec![
        model(
            "claude-opus-4.5",
            "Claude Opus 4.5",
            "Anthropic",
            "Latest Claude model with enhanced creative writing",
        ),
        model(
            "gpt-5.2",
            "GPT-5.2",
            "OpenAI",
            "GPT-5 series with improved reasoning",
        ),
        model(
            "gemini-3-pro",
            "Gemini 3 Pro",
            "Google DeepMind",
            "Gemini 3 generation flagship model",
        ),
        model(
            "qwen3-max",
            "Qwen3-Max",
            "Alibaba Cloud",
            "Qwen 3 series maximum capability model",
        ),
        model(
            "deepseek-v3.2",
            "DeepSeek V3.2",
            "DeepSeek",
            "DeepSeek V3 series with enhanced context",
        ),
        model(
            "minimax-m2",
            "MiniMax M2",
            "MiniMax",
            "MiniMax M2 generation for coding and agents",
        ),
        model(
            "kimi-k2-thinking",
            "Kimi K2 Thinking",
            "Moonshot AI",
            "1T parameter MoE with 256K context",
        ),
        model(
            "glm-4.6",
            "GLM-4.6",
            "Zhipu AI",
            "ChatGLM 4 series latest version",
        ),
    ]
}

/// Display name for a model id. Ids missing from the catalog pass
/// through unchanged so new models appear on the board before the
/// catalog learns about them.
pub fn model_display_name<'a>(catalog: &'a [ModelEntry], id: &'a str) -> &'a str {
    catalog
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.name.as_str())
        .unwrap_or(id)
}

/// Display name for a dimension id, falling back to title-casing
/// unknown ids.
pub fn dimension_display_name(dimensions: &[DimensionSpec], id: &str) -> String {
    dimensions
        .iter()
        .find(|spec| spec.id == id)
        .map(DimensionSpec::display_name)
        .unwrap_or_else(|| title_case(id))
}

/// Title-case an underscore-separated identifier.
pub fn title_case(id: &str) -> String {
    id.split('_')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dimension(
    id: &str,
    metric: &str,
    kind: EvalKind,
    description: &str,
    key_metrics: &[&str],
) -> DimensionSpec {
    DimensionSpec {
        id: id.to_string(),
        metric: metric.to_string(),
        file: None,
        description: description.to_string(),
        kind,
        key_metrics: key_metrics.iter().map(|name| name.to_string()).collect(),
    }
}

fn model(id: &str, name: &str, provider: &str, description: &str) -> ModelEntry {
    ModelEntry {
        id: id.to_string(),
        name: name.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
    }
}
