// Local ONNX named-entity recognizer (BERT token classification).
//
// Expects the dslim/bert-base-NER layout: `model.onnx`, `tokenizer.json`
// and the Hugging Face `config.json` whose `id2label` maps logit columns to
// BIO tags (O, B-PER, I-PER, B-ORG, ...). Tags are decoded back into spans
// of the original text using the tokenizer's byte offsets.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::traits::{Entity, EntityRecognizer};
use crate::error::{ProcessingError, ResourceError};

/// BERT's position embedding limit.
const MAX_SEQUENCE_LEN: usize = 512;

pub const NER_MODEL_FILE: &str = "model.onnx";
pub const NER_TOKENIZER_FILE: &str = "tokenizer.json";
pub const NER_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

pub struct OnnxEntityRecognizer {
    // ort::Session::run takes &mut self
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxEntityRecognizer {
    /// Load the NER model, tokenizer and label map from `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, ResourceError> {
        let model_path = model_dir.join(NER_MODEL_FILE);
        let tokenizer_path = model_dir.join(NER_TOKENIZER_FILE);
        let config_path = model_dir.join(NER_CONFIG_FILE);

        for (what, path) in [
            ("NER model", &model_path),
            ("NER tokenizer", &tokenizer_path),
            ("NER label config", &config_path),
        ] {
            if !path.exists() {
                return Err(ResourceError::Missing {
                    what,
                    path: path.clone(),
                });
            }
        }

        let raw_config = std::fs::read_to_string(&config_path)
            .map_err(|e| ResourceError::corrupt("NER label config", &config_path, e))?;
        let labels = labels_from_config(&raw_config)
            .map_err(|e| ResourceError::corrupt("NER label config", &config_path, e))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ResourceError::corrupt("NER tokenizer", &tokenizer_path, e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LEN,
                ..Default::default()
            }))
            .map_err(|e| ResourceError::corrupt("NER tokenizer", &tokenizer_path, e))?;

        let session = Session::builder()
            .map_err(|e| ResourceError::corrupt("NER model", &model_path, e))?
            .commit_from_file(&model_path)
            .map_err(|e| ResourceError::corrupt("NER model", &model_path, e))?;

        debug!(
            labels = labels.len(),
            "Loaded ONNX NER model from {}",
            model_dir.display()
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
        })
    }
}

impl EntityRecognizer for OnnxEntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, ProcessingError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ProcessingError::Tokenization(e.to_string()))?;

        let seq_len = encoding.get_ids().len();
        let shape = [1_i64, seq_len as i64];

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let input_ids_tensor = Tensor::from_array((shape, input_ids))
            .map_err(|e| ProcessingError::Inference(e.to_string()))?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
            .map_err(|e| ProcessingError::Inference(e.to_string()))?;
        let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids))
            .map_err(|e| ProcessingError::Inference(e.to_string()))?;

        // Output shape: [1, seq_len, num_labels], raw logits
        let logits = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| ProcessingError::Inference(format!("session lock poisoned: {e}")))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor
                })
                .map_err(|e| ProcessingError::Inference(e.to_string()))?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ProcessingError::MalformedOutput(e.to_string()))?;

            data.to_vec()
        };

        let num_labels = self.labels.len();
        if logits.len() != seq_len * num_labels {
            return Err(ProcessingError::MalformedOutput(format!(
                "expected {} logits ({seq_len} tokens x {num_labels} labels), got {}",
                seq_len * num_labels,
                logits.len()
            )));
        }

        let special = encoding.get_special_tokens_mask();
        let word_ids = encoding.get_word_ids();
        let offsets = encoding.get_offsets();

        let tags: Vec<TokenTag<'_>> = logits
            .chunks(num_labels)
            .enumerate()
            .map(|(i, row)| TokenTag {
                label: &self.labels[argmax(row)],
                offsets: offsets[i],
                word_id: word_ids[i],
                special: special[i] == 1,
            })
            .collect();

        let entities = decode_entities(text, &tags);
        debug!(
            entities = entities.len(),
            text_preview = %crate::output::truncate_chars(text, 50),
            "NER tagged text"
        );
        Ok(entities)
    }
}

/// Read the `id2label` map from a Hugging Face model config into a
/// column-indexed label list.
fn labels_from_config(raw: &str) -> Result<Vec<String>, String> {
    let config: ModelConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut indexed: Vec<(usize, String)> = config
        .id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|i| (i, label))
                .map_err(|_| format!("non-numeric label id {id:?}"))
        })
        .collect::<Result<_, _>>()?;
    indexed.sort_by_key(|(i, _)| *i);

    if indexed.is_empty() {
        return Err("id2label is empty".to_string());
    }
    if indexed.iter().enumerate().any(|(pos, (i, _))| pos != *i) {
        return Err("id2label ids are not contiguous from 0".to_string());
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_val), (i, &v)| {
            if v > best_val {
                (i, v)
            } else {
                (best, best_val)
            }
        })
        .0
}

/// One classified token, ready for span decoding.
#[derive(Debug, Clone, Copy)]
struct TokenTag<'a> {
    label: &'a str,
    /// Byte offsets into the original text
    offsets: (usize, usize),
    /// Index of the source word; shared by all subword pieces of a word
    word_id: Option<u32>,
    special: bool,
}

/// Merge BIO-tagged tokens into entity spans.
///
/// A word's first subword decides its tag; later pieces of the same word
/// only extend the current span. `B-` or a change of type starts a new
/// span, `O` closes the current one.
fn decode_entities(text: &str, tags: &[TokenTag<'_>]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut current: Option<OpenSpan<'_>> = None;
    let mut prev_word: Option<u32> = None;

    for tag in tags {
        if tag.special {
            continue;
        }

        let continues_word = tag.word_id.is_some() && tag.word_id == prev_word;
        prev_word = tag.word_id;

        if continues_word {
            if let Some(open) = current.as_mut() {
                open.end = tag.offsets.1;
            }
            continue;
        }

        match split_tag(tag.label) {
            (_, None) => close_span(text, current.take(), &mut entities),
            (Some('I'), Some(kind)) if current.as_ref().is_some_and(|o| o.label == kind) => {
                if let Some(open) = current.as_mut() {
                    open.end = tag.offsets.1;
                }
            }
            (_, Some(kind)) => {
                close_span(text, current.take(), &mut entities);
                current = Some(OpenSpan {
                    label: kind,
                    start: tag.offsets.0,
                    end: tag.offsets.1,
                });
            }
        }
    }
    close_span(text, current.take(), &mut entities);

    entities
}

struct OpenSpan<'a> {
    label: &'a str,
    start: usize,
    end: usize,
}

fn close_span(text: &str, span: Option<OpenSpan<'_>>, entities: &mut Vec<Entity>) {
    let Some(span) = span else { return };
    let Some(slice) = text.get(span.start..span.end) else { return };
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        entities.push(Entity::new(trimmed, span.label));
    }
}

/// Split "B-PER" into (Some('B'), Some("PER")). "O" has no entity type.
fn split_tag(label: &str) -> (Option<char>, Option<&str>) {
    if label == "O" {
        return (None, None);
    }
    match label.split_once('-') {
        Some((prefix, kind)) if prefix.len() == 1 => (prefix.chars().next(), Some(kind)),
        _ => (None, Some(label)),
    }
}
