use crate::models::{Question, QuestionOption, QuestionType};

const CORRECT_MARKER: &str = "(correct)";

/// Recover structured questions from generated text
///
/// Best effort: lines that match none of the expected shapes are folded into
/// the current question text or ignored, and text before the first question
/// header is dropped.
pub fn parse_questions(text: &str, question_type: QuestionType) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<Question> = None;
    let mut in_model_answer = false;

    for raw in text.lines() {
        let line = raw.replace("**", "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((number, rest)) = parse_header(line) {
            if let Some(done) = current.take() {
                questions.push(finish(done));
            }
            current = Some(Question::new(number, rest));
            in_model_answer = false;
            continue;
        }

        let Some(question) = current.as_mut() else {
            continue;
        };

        if let Some(answer) = strip_prefix_ci(line, "model answer:") {
            question.model_answer = Some(answer.trim().to_string());
            in_model_answer = true;
            continue;
        }

        if in_model_answer {
            if let Some(answer) = question.model_answer.as_mut() {
                if !answer.is_empty() {
                    answer.push('\n');
                }
                answer.push_str(line);
            }
            continue;
        }

        if question_type == QuestionType::Mcq {
            if let Some((label, option_text)) = parse_option(line) {
                let (option_text, correct) = strip_correct_marker(option_text);
                question.options.push(QuestionOption { label, text: option_text, correct });
                continue;
            }

            if let Some(label) = parse_answer_line(line) {
                for option in question.options.iter_mut() {
                    option.correct = option.label == label;
                }
                continue;
            }
        }

        if question.options.is_empty() {
            if !question.text.is_empty() {
                question.text.push(' ');
            }
            question.text.push_str(line);
        }
    }

    if let Some(done) = current {
        questions.push(finish(done));
    }

    questions
}

fn finish(mut question: Question) -> Question {
    question.text = question.text.trim().to_string();
    question.correct_option = question.options.iter().find(|o| o.correct).map(|o| o.label);
    if let Some(answer) = question.model_answer.as_ref() {
        if answer.trim().is_empty() {
            question.model_answer = None;
        }
    }
    question
}

/// `Q1) text`, `Q1. text`, `Q1: text` or `Question 1: text`
fn parse_header(line: &str) -> Option<(u32, String)> {
    let rest = strip_prefix_ci(line, "question ")
        .or_else(|| line.strip_prefix('Q'))
        .or_else(|| line.strip_prefix('q'))?;

    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let number: u32 = rest[..digits_end].parse().ok()?;

    let after = &rest[digits_end..];
    let body = after.strip_prefix([')', '.', ':'])?;
    Some((number, body.trim().to_string()))
}

/// `A) text` or `A. text` for labels A through D
fn parse_option(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let label = chars.next()?.to_ascii_uppercase();
    if !('A'..='D').contains(&label) {
        return None;
    }
    let separator = chars.next()?;
    if separator != ')' && separator != '.' {
        return None;
    }
    let body = chars.as_str();
    if !body.is_empty() && !body.starts_with(char::is_whitespace) {
        return None;
    }
    Some((label, body.trim()))
}

/// `Answer: B` or `Correct Answer: B)`
fn parse_answer_line(line: &str) -> Option<char> {
    let rest = strip_prefix_ci(line, "correct answer:").or_else(|| strip_prefix_ci(line, "answer:"))?;
    let label = rest.trim().chars().next()?.to_ascii_uppercase();
    ('A'..='D').contains(&label).then_some(label)
}

fn strip_correct_marker(text: &str) -> (String, bool) {
    let lower = text.to_ascii_lowercase();
    match lower.find(CORRECT_MARKER) {
        Some(idx) => {
            let mut cleaned = String::with_capacity(text.len());
            cleaned.push_str(&text[..idx]);
            cleaned.push_str(&text[idx + CORRECT_MARKER.len()..]);
            (cleaned.trim().to_string(), true)
        }
        None => (text.to_string(), false),
    }
}

fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &line[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCQ: &str = "\
Here are your questions:

Q1) What is the powerhouse of the cell?
A) Nucleus
B) Mitochondria (Correct)
C) Ribosome
D) Golgi apparatus

**Q2) Which gas do plants absorb?**
A) Oxygen
B) Nitrogen
C) Carbon dioxide (Correct)
D) Helium
";

    #[test]
    fn test_parse_mcq() {
        let questions = parse_questions(MCQ, QuestionType::Mcq);
        assert_eq!(questions.len(), 2);

        let q1 = &questions[0];
        assert_eq!(q1.number, 1);
        assert_eq!(q1.text, "What is the powerhouse of the cell?");
        assert_eq!(q1.options.len(), 4);
        assert_eq!(q1.options[1].text, "Mitochondria");
        assert_eq!(q1.correct_option, Some('B'));
        assert_eq!(q1.correct_count(), 1);

        let q2 = &questions[1];
        assert_eq!(q2.text, "Which gas do plants absorb?");
        assert_eq!(q2.correct_option, Some('C'));
        assert!(q2.model_answer.is_none());
    }

    #[test]
    fn test_parse_mcq_answer_line() {
        let text = "Q1. Pick one\nA. first\nB. second\nC. third\nD. fourth\nAnswer: d";
        let questions = parse_questions(text, QuestionType::Mcq);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_option, Some('D'));
        assert_eq!(questions[0].correct_count(), 1);
    }

    #[test]
    fn test_parse_subjective() {
        let text = "\
Q1) Explain osmosis.
Model Answer: Osmosis is the movement of water
across a semi-permeable membrane.
Q2: Define entropy.
Model Answer: A measure of disorder.
";
        let questions = parse_questions(text, QuestionType::Subjective);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "Explain osmosis.");
        assert_eq!(
            questions[0].model_answer.as_deref(),
            Some("Osmosis is the movement of water\nacross a semi-permeable membrane.")
        );
        assert!(questions[0].options.is_empty());
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[1].model_answer.as_deref(), Some("A measure of disorder."));
    }

    #[test]
    fn test_subjective_ignores_option_shapes() {
        let text = "Q1) Discuss the causes.\nA. Consider economics first";
        let questions = parse_questions(text, QuestionType::Subjective);
        assert!(questions[0].options.is_empty());
        assert_eq!(questions[0].text, "Discuss the causes. A. Consider economics first");
    }

    #[test]
    fn test_multiline_question_text() {
        let text = "Question 3: Read the passage\nand answer the following\nA) yes\nB) no (correct)";
        let questions = parse_questions(text, QuestionType::Mcq);
        assert_eq!(questions[0].number, 3);
        assert_eq!(questions[0].text, "Read the passage and answer the following");
        assert_eq!(questions[0].correct_option, Some('B'));
    }

    #[test]
    fn test_no_headers_yields_nothing() {
        assert!(parse_questions("Sorry, I cannot help with that.", QuestionType::Mcq).is_empty());
        assert!(parse_questions("", QuestionType::Subjective).is_empty());
    }

    #[test]
    fn test_header_requires_number_and_separator() {
        assert!(parse_header("Quantum mechanics is hard").is_none());
        assert!(parse_header("Q) missing number").is_none());
        assert!(parse_header("Q12 no separator").is_none());
        assert_eq!(parse_header("Q12) twelve"), Some((12, "twelve".to_string())));
    }

    #[test]
    fn test_option_requires_separator_and_space() {
        assert!(parse_option("Apples are red").is_none());
        assert!(parse_option("E) fifth").is_none());
        assert!(parse_option("A.B.C").is_none());
        assert_eq!(parse_option("b) lower"), Some(('B', "lower")));
    }
}
