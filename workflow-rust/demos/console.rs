use dotenvy::dotenv;
use std::{env, error::Error, sync::Arc};
use tracing_subscriber::EnvFilter;
use wiki_quiz_client::{QuizClient, QuizClientOptions};
use wiki_quiz_workflow::{HistoryListView, QuizController, QuizView};

// Usage: cargo run --example console -- https://en.wikipedia.org/wiki/Alan_Turing
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = QuizClient::new(QuizClientOptions {
        base_url: env::var("WIKI_QUIZ_BASE_URL").ok(),
        ..Default::default()
    });
    let mut controller = QuizController::new(Arc::new(backend));

    if let Some(url) = env::args().nth(1) {
        controller.set_url_input(url);
        let state = controller.generate().await;

        match (state.quiz(), state.failure()) {
            (Some(quiz), _) => print_quiz(&QuizView::new(quiz, true)),
            (_, Some(failure)) => eprintln!("Error: {failure}"),
            _ => {}
        }
    }

    controller.load_history().await;
    match controller.history_view() {
        HistoryListView::Items(items) => {
            println!("\nPast quizzes:");
            for item in items {
                println!(
                    "  [{}] {} ({}) {}",
                    item.id,
                    item.title,
                    item.url,
                    item.format_generated_at()
                );
            }
        }
        HistoryListView::Empty => println!("\nNo quizzes generated yet."),
        HistoryListView::Unavailable | HistoryListView::Loading => {
            if let Some(error) = controller.history().error() {
                eprintln!("Error: {error}");
            }
        }
    }

    Ok(())
}

fn print_quiz(view: &QuizView<'_>) {
    println!("{}", view.title);
    if let Some(summary) = view.summary {
        println!("\n{summary}");
    }

    for group in &view.entity_groups {
        println!("\n{}: {}", group.heading, group.items.join(", "));
    }

    if !view.sections.is_empty() {
        println!("\nSections: {}", view.sections.join(", "));
    }

    if view.has_questions() {
        println!("\nQuiz Questions");
        for question in &view.questions {
            println!(
                "\n{}. {} [{}]",
                question.number, question.question, question.difficulty_label
            );
            for option in &question.options {
                let marker = if option.is_correct { "*" } else { " " };
                println!("  {marker} {}. {}", option.label, option.text);
            }
            if let Some(explanation) = question.explanation {
                println!("  Explanation: {explanation}");
            }
        }
    }

    if !view.related_topics.is_empty() {
        println!("\nRelated Topics: {}", view.related_topics.join(", "));
    }
}
