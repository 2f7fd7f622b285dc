use std::collections::HashMap;

use crate::sentiment::scorer::PolarityScorer;

/// Factor applied to a word's polarity when it follows a negation.
const NEGATION_FACTOR: f64 = -0.5;
/// Amplification per exclamation mark, counted up to `MAX_EXCLAMATIONS`.
const EXCLAMATION_BOOST: f64 = 1.1;
const MAX_EXCLAMATIONS: i32 = 3;

/// Pattern-style lexicon scorer.
///
/// Every lexicon hit produces one assessment. Intensifiers directly in front
/// of a hit scale it, negations flip and dampen it. The polarity of a text is
/// the mean of its assessments, each limited to [-1, 1].
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    negations: Vec<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let mut words = HashMap::new();

        let positive_words = vec![
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("best", 1.0),
            ("better", 0.5),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("wonderful", 1.0),
            ("fantastic", 0.4),
            ("brilliant", 0.9),
            ("happy", 0.8),
            ("glad", 0.5),
            ("love", 0.5),
            ("beautiful", 0.85),
            ("nice", 0.6),
            ("positive", 0.23),
            ("perfect", 1.0),
            ("success", 0.3),
            ("successful", 0.75),
            ("win", 0.8),
            ("wins", 0.8),
            ("won", 0.5),
            ("strong", 0.43),
            ("stronger", 0.4),
            ("growth", 0.3),
            ("gain", 0.3),
            ("gains", 0.3),
            ("surge", 0.4),
            ("soar", 0.5),
            ("soars", 0.5),
            ("record", 0.3),
            ("boost", 0.4),
            ("improve", 0.4),
            ("improved", 0.4),
            ("breakthrough", 0.6),
            ("innovative", 0.5),
            ("hopeful", 0.5),
            ("optimistic", 0.5),
            ("safe", 0.5),
            ("secure", 0.4),
            ("peaceful", 0.6),
            ("healthy", 0.5),
            ("celebrate", 0.6),
            ("celebrates", 0.6),
            ("praise", 0.5),
            ("praised", 0.5),
            ("top", 0.5),
            ("new", 0.14),
            ("free", 0.4),
            ("easy", 0.43),
            ("important", 0.4),
            ("popular", 0.6),
            ("impressive", 1.0),
            ("remarkable", 0.75),
            ("exciting", 0.3),
            ("recovery", 0.35),
            ("rally", 0.4),
            ("profit", 0.4),
            ("approve", 0.4),
            ("approved", 0.4),
            ("agreement", 0.3),
        ];

        let negative_words = vec![
            ("bad", -0.7),
            ("worse", -0.4),
            ("worst", -1.0),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("poor", -0.4),
            ("sad", -0.5),
            ("angry", -0.5),
            ("hate", -0.8),
            ("ugly", -0.7),
            ("wrong", -0.5),
            ("negative", -0.3),
            ("fail", -0.5),
            ("fails", -0.5),
            ("failed", -0.5),
            ("failure", -0.5),
            ("loss", -0.4),
            ("losses", -0.4),
            ("lose", -0.4),
            ("weak", -0.375),
            ("weaker", -0.4),
            ("decline", -0.3),
            ("drop", -0.3),
            ("drops", -0.3),
            ("fall", -0.3),
            ("falls", -0.3),
            ("plunge", -0.6),
            ("plunges", -0.6),
            ("crash", -0.6),
            ("crisis", -0.6),
            ("collapse", -0.7),
            ("war", -0.5),
            ("attack", -0.5),
            ("killed", -0.6),
            ("dead", -0.2),
            ("deadly", -0.7),
            ("dangerous", -0.6),
            ("threat", -0.4),
            ("risk", -0.2),
            ("fear", -0.5),
            ("fears", -0.5),
            ("worried", -0.4),
            ("concern", -0.3),
            ("concerns", -0.3),
            ("scandal", -0.6),
            ("fraud", -0.8),
            ("lawsuit", -0.3),
            ("violent", -0.8),
            ("disaster", -0.8),
            ("tragic", -0.75),
            ("toxic", -0.6),
            ("disappointing", -0.6),
            ("difficult", -0.5),
            ("hard", -0.29),
            ("slow", -0.3),
            ("sick", -0.71),
            ("broken", -0.4),
            ("illegal", -0.5),
            ("layoffs", -0.4),
            ("recession", -0.5),
        ];

        for (word, score) in positive_words.into_iter().chain(negative_words) {
            words.insert(word.to_string(), score);
        }

        let negations = vec![
            "not", "no", "never", "neither", "nor", "none", "nothing", "nobody",
            "cannot", "cant", "dont", "doesnt", "didnt", "wont", "isnt", "arent",
            "wasnt", "werent", "hardly", "barely",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut intensifiers = HashMap::new();
        intensifiers.insert("very".to_string(), 1.3);
        intensifiers.insert("really".to_string(), 1.3);
        intensifiers.insert("so".to_string(), 1.2);
        intensifiers.insert("too".to_string(), 1.2);
        intensifiers.insert("extremely".to_string(), 1.5);
        intensifiers.insert("incredibly".to_string(), 1.5);
        intensifiers.insert("highly".to_string(), 1.3);
        intensifiers.insert("most".to_string(), 1.4);
        intensifiers.insert("more".to_string(), 1.2);
        intensifiers.insert("deeply".to_string(), 1.4);
        intensifiers.insert("slightly".to_string(), 0.5);
        intensifiers.insert("somewhat".to_string(), 0.7);
        intensifiers.insert("fairly".to_string(), 0.8);
        intensifiers.insert("less".to_string(), 0.6);

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    pub fn get_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        word.ends_with("n't") || self.negations.contains(&word)
    }

    pub fn get_intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(&word.to_lowercase()).copied()
    }

    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score);
    }

    /// Per-hit assessments, before averaging.
    pub fn assessments(&self, text: &str) -> Vec<f64> {
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS as usize) as i32;
        let boost = EXCLAMATION_BOOST.powi(exclamations);

        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut multiplier = 1.0;

        for token in tokenize(text) {
            if self.is_negation(&token) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.get_intensifier(&token) {
                multiplier *= mult;
                continue;
            }

            if let Some(mut score) = self.get_score(&token) {
                score *= multiplier;
                if negate_next {
                    score *= NEGATION_FACTOR;
                }
                scores.push((score * boost).clamp(-1.0, 1.0));
            }

            negate_next = false;
            multiplier = 1.0;
        }

        scores
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let scores = self.assessments(text);
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('’', "'").trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
}
