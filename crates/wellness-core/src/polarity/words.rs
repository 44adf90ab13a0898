//! Default word valences
//!
//! Valences use the `[-4, 4]` intensity scale common to lexicon-based
//! analyzers, biased toward vocabulary that shows up in personal journals.

pub(super) const VALENCES: &[(&str, f64)] = &[
    // Positive
    ("accomplished", 1.8),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("calm", 1.3),
    ("cheerful", 2.5),
    ("comfortable", 1.5),
    ("confident", 2.2),
    ("content", 1.6),
    ("delicious", 2.7),
    ("energetic", 1.9),
    ("energized", 2.0),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excited", 2.2),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("focused", 1.2),
    ("fresh", 1.3),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("healthy", 1.7),
    ("hopeful", 1.9),
    ("inspired", 2.0),
    ("joy", 2.8),
    ("laugh", 2.6),
    ("laughed", 2.5),
    ("love", 3.2),
    ("loved", 2.9),
    ("motivated", 1.6),
    ("nice", 1.8),
    ("peaceful", 2.2),
    ("pleasant", 2.3),
    ("productive", 1.6),
    ("proud", 2.1),
    ("refreshed", 1.8),
    ("relaxed", 1.8),
    ("relaxing", 2.0),
    ("rested", 1.4),
    ("smile", 1.5),
    ("strong", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("thankful", 2.0),
    ("well", 1.1),
    ("win", 2.8),
    ("wonderful", 2.7),
    // Negative
    ("afraid", -2.2),
    ("alone", -1.0),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("anxious", -1.0),
    ("argument", -1.5),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bored", -1.1),
    ("boring", -1.3),
    ("cry", -2.1),
    ("cried", -2.1),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("drained", -1.5),
    ("exhausted", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fear", -2.2),
    ("frustrated", -2.0),
    ("frustrating", -1.9),
    ("guilty", -1.8),
    ("hard", -0.4),
    ("hate", -2.7),
    ("headache", -1.8),
    ("hurt", -2.4),
    ("ill", -1.8),
    ("lonely", -2.0),
    ("lost", -1.3),
    ("miserable", -2.7),
    ("nervous", -1.1),
    ("overwhelmed", -1.5),
    ("pain", -2.3),
    ("panic", -2.3),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scared", -1.9),
    ("sick", -1.9),
    ("sleepless", -1.6),
    ("stress", -1.8),
    ("stressed", -1.8),
    ("stressful", -1.9),
    ("struggle", -1.5),
    ("struggled", -1.6),
    ("terrible", -2.1),
    ("tired", -1.3),
    ("upset", -1.6),
    ("worried", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
];

/// Words that intensify the next sentiment word
pub(super) const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "deeply",
    "especially",
    "extremely",
    "incredibly",
    "really",
    "so",
    "super",
    "totally",
    "very",
];

/// Words that soften the next sentiment word
pub(super) const DAMPENERS: &[&str] = &[
    "barely",
    "hardly",
    "kinda",
    "little",
    "slightly",
    "somewhat",
    "sorta",
];

pub(super) const NEGATIONS: &[&str] = &[
    "cannot", "neither", "never", "no", "nobody", "none", "nor", "not", "nothing", "without",
];
