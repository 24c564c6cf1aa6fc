//! Example generating quiz questions with a local Ollama model
//!
//! Note: This example requires Ollama to be running locally with the model
//! pulled (`ollama pull llama3.1`).
//! To run: cargo run --example ollama_example

use quizforge_core::models::{GenerationParams, QuestionType};
use quizforge_core::processing::{parse_questions, question_prompt};
use quizforge_llm::{GenerateOptions, Generator, OllamaGenerator};

const PASSAGE: &str = "Photosynthesis is the process by which green plants use \
sunlight, water, and carbon dioxide to produce glucose and oxygen. It takes \
place mainly in the chloroplasts of leaf cells, where chlorophyll absorbs light.";

#[tokio::main]
async fn main() {
    println!("QuizForge LLM - Ollama Generator Example");
    println!("========================================\n");

    let generator = OllamaGenerator::localhost("llama3.1");
    println!("Model: {}\n", generator.model_name());

    let params = GenerationParams {
        num_questions: 2,
        question_type: QuestionType::Mcq,
        ..GenerationParams::default()
    };
    let prompt = question_prompt(PASSAGE, &params);

    println!("Requesting {} questions...", params.num_questions);
    println!("(This will fail if Ollama is not running)\n");

    match generator.generate(&prompt, &GenerateOptions::default().with_temperature(0.4)).await {
        Ok(raw) => {
            println!("Raw output:\n{}\n", raw);

            let questions = parse_questions(&raw, params.question_type);
            println!("Parsed {} questions:", questions.len());
            for question in &questions {
                println!(
                    "  Q{}: {} ({} options, correct: {:?})",
                    question.number,
                    question.text,
                    question.options.len(),
                    question.correct_option
                );
            }
        }
        Err(e) => {
            println!("Generation failed: {}", e);
        }
    }
}
