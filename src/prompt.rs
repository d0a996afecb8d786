//! System instruction and prompt-side text analysis.
//!
//! The supportive system instruction is a crate constant sent as the
//! hidden first turn of every generative request. This module also owns
//! the small text scans that run before any reply path: crisis keyword
//! detection (which bypasses everything else), negative-mood detection
//! (which gates the faith-verse hint), and "my name is" extraction for
//! user memory.

use crate::resources::{HELPLINES, WEBSITES};
use crate::session::Faith;

/// Core behaviour rules for the generative collaborator.
pub const SYSTEM_PROMPT: &str = "\
You are a supportive and empathetic AI assistant designed to provide general information \
and comfort related to mental well-being. Your purpose is to offer a listening ear and \
suggest simple, helpful strategies for coping with difficult emotions. You must always \
maintain a compassionate and non-judgmental tone. Your responses should be encouraging \
and focus on positive coping mechanisms. You are NOT a substitute for a licensed mental \
health professional. Always include a disclaimer that you are an AI and recommend seeking \
professional help for serious concerns. If the user has provided their name, address them \
by their name to make the conversation more personal.\n\
\n\
Key guidelines:\n\
- Empathy: start responses with empathetic phrases like \"I hear you\" or \"That must be difficult\".\n\
- Validation: validate the user's feelings; \"Your feelings are valid\" is helpful.\n\
- General advice: offer simple, actionable suggestions (deep breaths, journaling, a short \
walk, reaching out to a trusted friend).\n\
- Professional disclaimer: for non-crisis questions, include a recommendation to speak \
with a therapist or mental health professional for personalized support.\n\
- Safety: never provide medical advice or any instruction that could be harmful. If the \
user mentions a crisis, provide a helpline number.\n\
\n\
Crisis response: if a user expresses thoughts of self-harm or suicide, your first priority \
is immediate emotional support and validation. Respond with a compassionate, human message \
focused on keeping them safe and encouraging them to talk, then provide the list of \
resources.\n\
\n\
Faith: if the user has specified their faith, you may offer one relevant, positive, \
uplifting verse from their religious text, never prescriptive or judgmental.";

/// Keywords that trigger the crisis response path.
pub const CRISIS_KEYWORDS: &[&str] = &["crisis", "emergency", "suicidal", "point anymore"];

/// Keywords that indicate a negative mood (gates the faith hint).
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad", "angry", "lonely", "stressed", "depressed", "low", "hopeless",
];

/// Whether the input calls for the crisis response.
#[must_use]
pub fn contains_crisis(text: &str) -> bool {
    let lower = text.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Whether the input reads as a negative mood.
#[must_use]
pub fn is_negative_mood(text: &str) -> bool {
    let lower = text.to_lowercase();
    NEGATIVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// The immediate crisis reply: supportive lines first, resources after.
#[must_use]
pub fn crisis_reply_lines() -> Vec<String> {
    let mut lines = vec![
        "I hear you. Please don't go. I'm here for you, and I want to listen.".to_owned(),
        "Things can get better, and you're not alone. You can talk to me about anything \
         that's on your mind."
            .to_owned(),
        "If you are in a crisis or experiencing an emergency, please contact a professional \
         immediately. You can find local helplines or contact emergency services."
            .to_owned(),
    ];
    for (name, contact) in HELPLINES {
        lines.push(format!("{name}: {contact}"));
    }
    for (name, url) in WEBSITES {
        lines.push(format!("{name}: {url}"));
    }
    lines
}

/// Faith-verse hint appended to a generative request when the user is
/// in a negative mood and has named a faith.
#[must_use]
pub fn faith_hint(faith: Faith) -> Option<String> {
    if !faith.seeks_faith_comfort() {
        return None;
    }
    Some(format!(
        "The user's faith is {}. The user may be comforted by a relevant and positive verse \
         from their holy book for their mood. Please provide one.",
        faith.label()
    ))
}

/// Extract a name from "my name is …" phrasing, capitalized.
#[must_use]
pub fn extract_name(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let idx = lower.find("my name is")?;
    // Byte offsets can drift between the original and its lowercase
    // form for non-ASCII input; bail out rather than slice mid-char.
    let rest = text.get(idx + "my name is".len()..)?.trim_start();
    let word: String = rest
        .chars()
        .take_while(|c| c.is_alphabetic() || *c == '-' || *c == '\'')
        .collect();
    if word.is_empty() {
        return None;
    }
    let mut chars = word.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase())
}
