use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use quizzical::{
    question::Correctness,
    source::{OpenTrivia, QuestionSource, RoundRequest},
    Config, Quiz,
};

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    log::info!("Starting quizzical...");

    let config = Config::load("config.yaml").await?;
    let source = OpenTrivia::new(config.api_url);
    let mut quiz = Quiz::new(RoundRequest {
        amount: config.amount,
        difficulty: config.difficulty,
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Quizzical");
    println!("Are you ready to test your knowledge? Press Enter to start.");
    if lines.next_line().await?.is_none() {
        return Ok(());
    }
    quiz.start();

    if !load_round(&mut quiz, &source, &mut lines).await? {
        return Ok(());
    }

    loop {
        render(&quiz);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "quit" => break,
            "" => {}
            "check" => {
                if quiz.all_answered() {
                    quiz.grade_round();
                } else {
                    println!("Answer every question first.");
                }
            }
            "again" => {
                if let Err(err) = quiz.start_new_round(&source).await {
                    log::error!("failed to load questions: {:#}", err);
                    println!("Could not load a new round, keeping the current one.");
                }
            }
            line => select_from_line(&mut quiz, line),
        }
    }

    Ok(())
}

/// Loads the first round, letting the user retry on a failed fetch.
/// Returns false when input runs out or the user quits.
async fn load_round(
    quiz: &mut Quiz,
    source: &impl QuestionSource,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    while let Err(err) = quiz.load_new_round(source).await {
        log::error!("failed to load questions: {:#}", err);
        println!("Could not load questions. Press Enter to retry, or type quit.");
        match lines.next_line().await? {
            Some(line) if line.trim() == "quit" => return Ok(false),
            Some(_) => {}
            None => return Ok(false),
        }
    }
    Ok(true)
}

fn select_from_line(quiz: &mut Quiz, line: &str) {
    let mut parts = line.split_whitespace();
    let (Some(number), Some(letter), None) = (parts.next(), parts.next(), parts.next()) else {
        usage();
        return;
    };
    let Ok(number) = number.parse::<usize>() else {
        usage();
        return;
    };
    let index = match letter.to_ascii_lowercase().as_str() {
        "a" => 0,
        "b" => 1,
        "c" => 2,
        "d" => 3,
        _ => {
            usage();
            return;
        }
    };

    let Some(question) = number.checked_sub(1).and_then(|n| quiz.questions().get(n)) else {
        println!("No question {}.", number);
        return;
    };
    let Some(answer) = question.answers.get(index) else {
        println!("No answer {} on question {}.", letter, number);
        return;
    };
    let (question_id, answer_id) = (question.id, answer.id);
    quiz.select_answer(question_id, answer_id);
}

fn usage() {
    println!("Commands: `<question> <answer>` (e.g. `2 c`), check, again, quit");
}

fn render(quiz: &Quiz) {
    println!();
    for (q_index, question) in quiz.questions().iter().enumerate() {
        println!("{}. {}", q_index + 1, question.text);
        for (a_index, answer) in question.answers.iter().enumerate() {
            let letter = (b'a' + a_index as u8) as char;
            let marker = if answer.is_graded {
                match answer.correctness {
                    Correctness::Correct => '✓',
                    Correctness::Incorrect => '✗',
                    Correctness::Unset if answer.is_correct => '→',
                    Correctness::Unset => ' ',
                }
            } else if answer.is_selected {
                '>'
            } else {
                ' '
            };
            println!("  {} {}) {}", marker, letter, answer.text);
        }
    }

    if quiz.is_graded() {
        println!();
        println!(
            "You scored {}/{} correct answers",
            quiz.score(),
            quiz.questions().len()
        );
        println!("Type `again` to play again, or `quit` to exit.");
    } else if quiz.all_answered() {
        println!();
        println!("All questions answered. Type `check` to grade the round.");
    }
}
