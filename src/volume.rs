use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;

/// Rough tokens-per-word ratio for English prose. Used for pre-generation
/// estimates where no actual text exists to tokenize yet.
const TOKENS_PER_WORD_NUM: u64 = 4;
const TOKENS_PER_WORD_DEN: u64 = 3;

/// Shape of a generation job as collected by the book setup form.
#[derive(Debug, Clone, Copy)]
pub struct JobShape {
    pub chapters: u32,
    pub topics_per_chapter: u32,
    pub words_per_topic: u32,
    pub images_per_chapter: u32,
}

/// Estimated text volume for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextVolume {
    pub words: u64,
    pub tokens: u64,
}

/// Estimate the text volume a job will produce, from its shape alone.
pub fn estimate_volume(shape: &JobShape) -> TextVolume {
    let words = u64::from(shape.chapters)
        * u64::from(shape.topics_per_chapter)
        * u64::from(shape.words_per_topic);
    TextVolume {
        words,
        tokens: words * TOKENS_PER_WORD_NUM / TOKENS_PER_WORD_DEN,
    }
}

/// Total images for a job shape.
pub fn total_images(shape: &JobShape) -> u32 {
    shape.chapters * shape.images_per_chapter
}

fn bpe() -> Option<&'static CoreBPE> {
    static BPE: OnceLock<Option<CoreBPE>> = OnceLock::new();
    BPE.get_or_init(|| tiktoken_rs::cl100k_base().ok()).as_ref()
}

/// Exact token count of real text using the cl100k_base encoding.
///
/// Falls back to the words-based approximation if the tokenizer fails to
/// initialize, so callers never have to handle an error for a display value.
pub fn count_tokens(text: &str) -> usize {
    match bpe() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => {
            let words = text.split_whitespace().count() as u64;
            (words * TOKENS_PER_WORD_NUM / TOKENS_PER_WORD_DEN) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_volume_multiplies_shape() {
        let shape = JobShape {
            chapters: 10,
            topics_per_chapter: 5,
            words_per_topic: 500,
            images_per_chapter: 2,
        };
        let volume = estimate_volume(&shape);
        assert_eq!(volume.words, 25_000);
        assert_eq!(volume.tokens, 25_000 * 4 / 3);
        assert_eq!(total_images(&shape), 20);
    }

    #[test]
    fn test_zero_shape_is_zero_volume() {
        let shape = JobShape {
            chapters: 0,
            topics_per_chapter: 8,
            words_per_topic: 400,
            images_per_chapter: 1,
        };
        assert_eq!(estimate_volume(&shape).words, 0);
        assert_eq!(total_images(&shape), 0);
    }

    #[test]
    fn test_count_tokens_nonzero_for_text() {
        let count = count_tokens("The quick brown fox jumps over the lazy dog.");
        assert!(count >= 9);
        assert_eq!(count_tokens(""), 0);
    }
}
