//! Prompts for the bookend scripts: course intro/conclusion and each
//! module's intro/conclusion.

use crate::course::ModuleOutline;

const SHARED_STYLE_RULES: &str = "\
- Mimic the style, personality, and structure of the provided example.
- Use a wide range of discourse markers and conversational openers, but do not copy the example verbatim.";

const MONOLOGUE_RULES: &str = "\
- The script should be a single plaintext monologue, as if directly addressing students.
- Avoid overly formal language.";

/// Intro for the module at some position.  `previous` is `None` for the
/// first module, which gets its own variant that does not introduce the
/// course itself.
pub fn module_intro(
    course_title: &str,
    previous: Option<&ModuleOutline>,
    current: &ModuleOutline,
    style_sample: &str,
) -> String {
    let current_summary = current.summary();
    match previous {
        None => format!(
            "You are an expert lecturer. Write a natural, engaging, and conversational lecture script to introduce the first module.\n\
             - The course is titled: '{course_title}'.\n\
             - Introduce what will be learned in the first module (see below).\n\
             {SHARED_STYLE_RULES}\n\
             - Keep the length to around 200 words or 1800 characters.\n\
             {MONOLOGUE_RULES}\n\
             - Hint that this is the first module of the course, but do not introduce the course.\n\
             First Module Summary:\n{current_summary}\n\
             Example Lecture Style:\n{style_sample}\n"
        ),
        Some(previous) => format!(
            "You are an expert lecturer. Write a natural, engaging, and conversational lecture script to introduce a new module in an online course.\n\
             - The course is titled: '{course_title}'.\n\
             - Briefly summarize what was learned in the previous module (see below).\n\
             - Introduce what will be learned in the new module (see below).\n\
             {SHARED_STYLE_RULES}\n\
             - Keep the length to 200 words or 1200 characters maximum.\n\
             {MONOLOGUE_RULES}\n\
             - If this is the first module, say so and do not reference a previous module.\n\
             Course Title: {course_title}\n\
             Previous Module Summary:\n{previous_summary}\n\
             Current Module Summary:\n{current_summary}\n\
             Example Lecture Style:\n{style_sample}\n",
            previous_summary = previous.summary(),
        ),
    }
}

/// Conclusion for a module.  `next` is `None` for the last module, whose
/// variant carries the course summary and leaves the course wrap-up to the
/// separate course conclusion.
pub fn module_conclusion(
    course_title: &str,
    current: &ModuleOutline,
    next: Option<&ModuleOutline>,
    course_summary: &str,
    style_sample: &str,
) -> String {
    let current_summary = current.summary();
    match next {
        None => format!(
            "You are an expert lecturer. Write a natural, engaging, and conversational lecture script to conclude the last module.\n\
             - There is a separate course conclusion script that will wrap up the entire course, so there is no need to conclude the course.\n\
             - Briefly summarize what was learned in the last module (see below).\n\
             {SHARED_STYLE_RULES}\n\
             - Keep the length to 200 words or 1800 characters maximum.\n\
             {MONOLOGUE_RULES}\n\
             Last Module Summary:\n{current_summary}\n\
             Course Summary:\n{course_summary}\n\
             Example Lecture Style:\n{style_sample}\n"
        ),
        Some(next) => format!(
            "You are an expert lecturer. Write a natural, engaging, and conversational lecture script to conclude a module in an online course.\n\
             - The course is titled: '{course_title}'.\n\
             - Briefly summarize what was learned in the current module (see below).\n\
             - Preview what will be learned in the next module (see below).\n\
             {SHARED_STYLE_RULES}\n\
             - Keep the length to 200 words or 1200 characters maximum.\n\
             {MONOLOGUE_RULES}\n\
             - If this is the last module, say so and do not reference a next module.\n\
             Course Title: {course_title}\n\
             Current Module Summary:\n{current_summary}\n\
             Next Module Summary:\n{next_summary}\n\
             Example Lecture Style:\n{style_sample}\n",
            next_summary = next.summary(),
        ),
    }
}

/// Opening script for the whole course.
pub fn course_intro(course_title: &str, course_summary: &str, style_sample: &str) -> String {
    course_bookend(
        "introduce an online course",
        "Briefly introduce the entire course",
        course_title,
        course_summary,
        style_sample,
    )
}

/// Closing script for the whole course.
pub fn course_conclusion(course_title: &str, course_summary: &str, style_sample: &str) -> String {
    course_bookend(
        "conclude an online course",
        "Reflect on and wrap up the entire course",
        course_title,
        course_summary,
        style_sample,
    )
}

fn course_bookend(
    purpose: &str,
    task: &str,
    course_title: &str,
    course_summary: &str,
    style_sample: &str,
) -> String {
    format!(
        "You are an expert lecturer. Write a natural, engaging, and conversational script to {purpose}.\n\
         - The course is titled: '{course_title}'.\n\
         - {task} (see below).\n\
         {SHARED_STYLE_RULES}\n\
         - Keep the length to around 300 words or 1800 characters.\n\
         {MONOLOGUE_RULES}\n\
         Course Title: {course_title}\n\
         Course Summary:\n{course_summary}\n\
         Example Lecture Style:\n{style_sample}\n"
    )
}
