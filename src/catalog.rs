//! Static model catalog and category grouping for the picker.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Model used when a chat request does not name one.
pub const DEFAULT_MODEL: &str = "minimaxai/minimax-m2";

/// Display order of picker categories. Catalog categories missing from this
/// list are not rendered (see `group_by_category`).
pub const CATEGORY_ORDER: &[&str] = &[
    "General Purpose",
    "NVIDIA",
    "Vision",
    "Code",
    "Reasoning",
    "Small Models",
    "Embedding",
    "Reranking",
    "Audio",
    "Medical",
    "Enterprise",
    "Japanese",
    "Chinese",
    "Multilingual",
    "Biology",
];

/// A selectable model with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl ModelDescriptor {
    fn new(id: &str, name: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
        }
    }
}

/// The fixed catalog served by `GET /api/v1/models`. No external call is made;
/// repeated calls always return the same list.
pub fn builtin_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("minimaxai/minimax-m2", "MiniMax M2", "General Purpose"),
        ModelDescriptor::new(
            "meta/llama-3.3-70b-instruct",
            "Llama 3.3 70B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "meta/llama-3.1-405b-instruct",
            "Llama 3.1 405B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "meta/llama-3.1-70b-instruct",
            "Llama 3.1 70B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "meta/llama-3.1-8b-instruct",
            "Llama 3.1 8B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "mistralai/mistral-large-2-instruct",
            "Mistral Large 2",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "mistralai/mixtral-8x7b-instruct-v0.1",
            "Mixtral 8x7B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new("google/gemma-2-27b-it", "Gemma 2 27B", "General Purpose"),
        ModelDescriptor::new("google/gemma-2-9b-it", "Gemma 2 9B", "General Purpose"),
        ModelDescriptor::new(
            "nvidia/llama-3.1-nemotron-70b-instruct",
            "Nemotron 70B Instruct",
            "NVIDIA",
        ),
        ModelDescriptor::new(
            "nvidia/nemotron-nano-12b-v2-vl",
            "Nemotron Nano 12B Vision",
            "NVIDIA Vision",
        ),
        ModelDescriptor::new(
            "deepseek-ai/deepseek-coder-6.7b-instruct",
            "DeepSeek Coder 6.7B",
            "Code",
        ),
        ModelDescriptor::new(
            "qwen/qwen2.5-coder-32b-instruct",
            "Qwen 2.5 Coder 32B",
            "Code",
        ),
        ModelDescriptor::new(
            "qwen/qwen2.5-72b-instruct",
            "Qwen 2.5 72B Instruct",
            "General Purpose",
        ),
        ModelDescriptor::new(
            "qwen/qwen3-next-80b-a3b-instruct",
            "Qwen 3 Next 80B",
            "General Purpose",
        ),
        ModelDescriptor::new("writer/palmyra-med-70b", "Palmyra Med 70B", "Medical"),
        ModelDescriptor::new("ibm/granite-3.0-8b-instruct", "Granite 3.0 8B", "Enterprise"),
        ModelDescriptor::new(
            "microsoft/phi-3-medium-128k-instruct",
            "Phi-3 Medium 128K",
            "General Purpose",
        ),
        ModelDescriptor::new("microsoft/phi-4", "Phi-4", "General Purpose"),
        ModelDescriptor::new("snowflake/arctic", "Arctic", "Enterprise"),
        ModelDescriptor::new(
            "upstage/solar-10.7b-instruct",
            "Solar 10.7B Instruct",
            "General Purpose",
        ),
    ]
}

/// Partition models by category and emit groups in `CATEGORY_ORDER` order.
///
/// Insertion order within each group is preserved. Categories present in the
/// catalog but missing from `CATEGORY_ORDER` are dropped from the result; a
/// catalog addition needs a matching order-list entry to show up.
pub fn group_by_category(models: &[ModelDescriptor]) -> Vec<(&'static str, Vec<&ModelDescriptor>)> {
    let groups: Vec<(&'static str, Vec<&ModelDescriptor>)> = CATEGORY_ORDER
        .iter()
        .filter_map(|&category| {
            let members: Vec<&ModelDescriptor> =
                models.iter().filter(|m| m.category == category).collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect();

    for model in models {
        if !CATEGORY_ORDER.contains(&model.category.as_str()) {
            debug!(
                model = %model.id,
                category = %model.category,
                "category not in display order, model hidden from picker"
            );
        }
    }

    groups
}
