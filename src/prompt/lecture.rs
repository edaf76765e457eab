//! Prompts for the five lecture stages and the previous-lecture summary.
//!
//! Each stage has a fixed instruction block followed by labelled inputs.
//! Length limits inside the instructions are requests to the model; nothing
//! here enforces them.

use crate::course::LectureRecord;

use super::{FIRST_TOPIC, LAST_TOPIC};

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

const RESEARCHER_INSTRUCTION: &str = "\
You are a research assistant. Given the following content, extract and summarize the main points and key facts in clear bullet points using the lecture outline as a reference for what should be included.
IMPORTANT INSTRUCTIONS:
- Use the provided **Lecture Outline** as your structural guide.
- Keep each bullet focused and self-contained.
- Prioritize accuracy and completeness over brevity, but avoid unnecessary detail.
- Label each bullet with a short descriptor (e.g. \"Concept: ...\", \"Example: ...\", \"Data: ...\") when helpful.
- Maintain a professional and objective tone.";

const STRUCTURER_INSTRUCTION: &str = "\
You are an expert course designer. Given these bullet points, organize them into a logical lecture outline with an introduction, main body (with subpoints), transitions, and a conclusion.
Make sure the outline flows naturally and is suitable for a spoken lecture.
Keep the length to 500 words or 3250 characters maximum.";

const LECTURER_INSTRUCTION: &str = "\
You are an expert lecturer. Using the following structured outline, write a natural, engaging, and conversational lecture script. Reference the previous and next topics for smooth transitions.
IMPORTANT: Do not overlap with the previous lecture's content (see summary below) or the next lecture's topic.
Keep the length to 500 words or 3250 characters maximum.";

const STYLIST_INSTRUCTION: &str = "\
You are a skilled lecture scriptwriter. Your task is to rewrite the following lecture script so that it mimics the personality, style and structure of the provided example.
IMPORTANT INSTRUCTIONS FOR STYLE:
- Use a wide range of discourse markers and conversational openers other than the ones in the example, but maintain the same style and structure.
- Keep the length to 500 words or 3250 characters maximum.
- The format is an online lecture, so it must be a single plaintext monologue.
- Do not use headings, markup or special symbols.
- Speak conversationally as if you're directly addressing students.
- Break complex ideas into understandable and simple analogies or stories.
- Avoid overly formal language or overly structured outlines.
- Keep note of the lecture title, previous topic and next topic. If the lecture is the first or last in the module, use the appropriate placeholder in the lecture script.";

const FACT_CHECKER_INSTRUCTION: &str = "\
You are a fact-checking assistant.
Compare the following lecture script with the provided reference content.
If the reference content contains the fact, do not correct it; if the fact is not in the reference content, correct it.
Only correct statements in the script that are factually incorrect according to the reference.
If a statement is vague or ambiguous due to the lecture's tone or style, do not correct it.
If you make any corrections, return a JSON object with the following keys:
\"corrected_script\": \"The corrected script\",
\"state\": \"Corrected\"
If no corrections are needed and all facts are accurate, return an empty JSON object: {}";

const SUMMARIZER_INSTRUCTION: &str = "\
You are a helpful assistant. Summarize the following lecture script in 5-7 concise bullet points, focusing on the main ideas and key takeaways. Do not include any content not present in the script.";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn outline_list(entries: &[String]) -> String {
    if entries.is_empty() {
        return "None".to_string();
    }
    entries
        .iter()
        .map(|e| format!("- {}", e.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 1: bullet-point extraction from the raw record.
pub fn research(record: &LectureRecord) -> String {
    format!(
        "{RESEARCHER_INSTRUCTION}\n\
         Lecture Title: {title}\n\
         Content:\n{content}\n\
         Description:\n{description}\n\
         Learning Objective:\n{objective}\n\
         Lecture Outline:\n{outline}\n",
        title = record.title,
        content = record.topic_content.trim(),
        description = record.description.trim(),
        objective = record.learning_objective.trim(),
        outline = outline_list(&record.outline),
    )
}

/// Stage 2: bullets into an intro/body/conclusion outline.
pub fn structure(title: &str, main_points: &str) -> String {
    format!(
        "{STRUCTURER_INSTRUCTION}\n\
         Lecture Title: {title}\n\
         Bullet Points:\n{main_points}\n"
    )
}

/// Stage 3: outline into a spoken draft that avoids its neighbours' topics.
pub fn draft(title: &str, outline: &str, previous_summary: &str, next_title: Option<&str>) -> String {
    format!(
        "{LECTURER_INSTRUCTION}\n\
         Lecture Title: {title}\n\
         Structured Outline:\n{outline}\n\
         Previous Lecture Summary:\n{previous_summary}\n\
         Next Topic: {next}\n",
        next = next_title.unwrap_or(LAST_TOPIC),
    )
}

/// Stage 4: rewrite the draft in the voice of the style sample.
pub fn stylize(
    title: &str,
    previous_title: Option<&str>,
    next_title: Option<&str>,
    style_sample: &str,
    script: &str,
) -> String {
    format!(
        "{STYLIST_INSTRUCTION}\n\
         Lecture Title: {title}\n\
         Previous Topic: {previous}\n\
         Next Topic: {next}\n\
         Example Lecture Style:\n{style_sample}\n\
         Lecture Script to Mimic:\n{script}\n",
        previous = previous_title.unwrap_or(FIRST_TOPIC),
        next = next_title.unwrap_or(LAST_TOPIC),
    )
}

/// Stage 5: compare the styled script against the lecture's own content.
pub fn fact_check(reference_content: &str, script: &str) -> String {
    format!(
        "{FACT_CHECKER_INSTRUCTION}\n\
         Reference Content:\n{reference_content}\n\
         Lecture Script:\n{script}\n"
    )
}

/// Summary of the previous lecture's final script.
pub fn summarize(script: &str) -> String {
    format!("{SUMMARIZER_INSTRUCTION}\n---\nLecture Script:\n{script}\n---\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
