use diesel::pg::PgConnection;
use dotenv::dotenv;
use exitfailure::ExitFailure;
use failure::ResultExt;
use std::fs::File;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use surveycards::actions;
use surveycards::cards::{CardDir, CardSide};
use surveycards::choices::{Age, Gender, Home, QuestionType};
use surveycards::config::Config;
use surveycards::models::*;

#[derive(StructOpt)]
enum Command {
    /// Create the tables if they do not exist yet.
    InitDb,
    AddSurvey {
        #[structopt(long)]
        name: Option<String>,
        #[structopt(long)]
        desc: Option<String>,
    },
    AddQuestion {
        text: String,
        #[structopt(short = "t", long = "type", default_value = "multiple-choice")]
        question_type: QuestionType,
    },
    AddFreeQuestion {
        text: String,
    },
    AddAnswer {
        text: String,
        /// Questions this answer option applies to.
        #[structopt(short, long = "question")]
        questions: Vec<i32>,
    },
    Link {
        answer: i32,
        question: i32,
    },
    /// Record one scanned card.
    Record {
        #[structopt(long)]
        survey: Option<i32>,
        #[structopt(short, long)]
        question: Option<i32>,
        #[structopt(short, long = "answer")]
        answers: Vec<i32>,
        #[structopt(long)]
        gender: Option<Gender>,
        #[structopt(long)]
        age: Option<Age>,
        #[structopt(long)]
        home: Option<Home>,
        #[structopt(long)]
        zip: Option<String>,
        #[structopt(long)]
        free_question: Option<i32>,
        #[structopt(long)]
        free_response: Option<String>,
        #[structopt(long)]
        front: Option<String>,
        #[structopt(long)]
        back: Option<String>,
    },
    DeleteQuestion {
        id: i32,
    },
    DeleteSurvey {
        id: i32,
    },
    List,
    /// List card scans that may be attached to a response.
    Cards {
        side: CardSide,
    },
    /// Write responses with their answers as JSON.
    Dump {
        #[structopt(long)]
        survey: Option<i32>,
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

#[derive(StructOpt)]
struct Args {
    #[structopt(flatten)]
    config: Config,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    env_logger::init();
    let _ = dotenv();
    let args = Args::from_args();
    let cards = args.config.cards();
    match args.command {
        Command::Cards { side } => print_cards(&cards, side)?,
        command => {
            let db = args.config.connect()?;
            run(&db, &cards, command)?;
        }
    }
    Ok(())
}

fn print_cards(cards: &CardDir, side: CardSide) -> Result<(), failure::Error> {
    for path in cards.choices(side).context("unable to list card scans")? {
        println!("{}", path);
    }
    Ok(())
}

fn run(db: &PgConnection, cards: &CardDir, command: Command) -> Result<(), failure::Error> {
    match command {
        Command::InitDb => {
            actions::install_schema(db).context("unable to create tables")?;
        }
        Command::AddSurvey { name, desc } => {
            let survey = actions::create_survey(
                db,
                &NewSurvey {
                    name: name.as_deref(),
                    desc: desc.as_deref(),
                },
            )?;
            println!("{}", survey.id);
        }
        Command::AddQuestion {
            text,
            question_type,
        } => {
            let question = actions::create_question(
                db,
                &NewQuestion {
                    question: &text,
                    question_type,
                },
            )?;
            println!("{}", question.id);
        }
        Command::AddFreeQuestion { text } => {
            let free = actions::create_free_question(
                db,
                &NewFreeQuestion {
                    free_question: &text,
                },
            )?;
            println!("{}", free.id);
        }
        Command::AddAnswer { text, questions } => {
            let answer = actions::create_answer(db, &NewAnswer { answer: &text }, &questions)?;
            println!("{}", answer.id);
        }
        Command::Link { answer, question } => {
            actions::link_answer_question(db, answer, question)?;
        }
        Command::Record {
            survey,
            question,
            answers,
            gender,
            age,
            home,
            zip,
            free_question,
            free_response,
            front,
            back,
        } => {
            let form = ResponseForm {
                q_id: question,
                gender,
                age,
                zip_code: zip,
                home,
                free_q_id: free_question,
                free_resp: free_response,
                survey_id: survey,
                front,
                back,
            };
            let response = actions::create_response(db, cards, &form, &answers)?;
            println!("{} ({})", response.id, response);
        }
        Command::DeleteQuestion { id } => {
            if !actions::delete_question(db, id)? {
                failure::bail!("question {} not found", id);
            }
        }
        Command::DeleteSurvey { id } => {
            if !actions::delete_survey(db, id)? {
                failure::bail!("survey {} not found", id);
            }
        }
        Command::List => list(db)?,
        Command::Cards { side } => print_cards(cards, side)?,
        Command::Dump { survey, output } => {
            let data = actions::export_responses(db, survey).context("unable to load responses")?;
            match output {
                Some(path) => {
                    let file = File::create(&path)?;
                    serde_json::to_writer_pretty(file, &data)?;
                }
                None => {
                    let out = stdout();
                    let mut out = out.lock();
                    serde_json::to_writer_pretty(&mut out, &data)?;
                    writeln!(out)?;
                }
            }
        }
    }
    Ok(())
}

fn list(db: &PgConnection) -> Result<(), failure::Error> {
    println!("Surveys:");
    for survey in actions::list_surveys(db)? {
        println!("{} ({})", survey.id, survey);
    }
    println!("Questions:");
    for question in actions::list_questions(db)? {
        println!("{} [{}] {}", question.id, question.question_type, question);
        for answer in actions::answers_for_question(db, question.id)? {
            println!("    {} ({})", answer.id, answer);
        }
    }
    println!("Free response questions:");
    for free in actions::list_free_questions(db)? {
        println!("{} {}", free.id, free);
    }
    Ok(())
}
