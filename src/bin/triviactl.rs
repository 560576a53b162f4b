use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenv::dotenv;
use exitfailure::ExitFailure;
use failure::ResultExt;
use structopt::StructOpt;
use trivia::actions;

#[derive(StructOpt)]
enum Command {
    /// Create the tables if they do not exist
    Init,
    /// Insert the default categories into an empty table
    Seed,
    AddCategory {
        #[structopt(name = "type")]
        type_: String,
    },
    Categories,
    Questions {
        #[structopt(short, long)]
        category: Option<i32>,
    },
    DeleteQuestion {
        id: i32,
    },
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: String,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    let _ = dotenv();
    env_logger::init();
    let args = Args::from_args();
    let db = PgConnection::establish(&args.database_url).context("unable to connect database")?;
    match args.command {
        Command::Init => {
            actions::create_schema(&db).context("unable to create tables")?;
            println!("Schema ready");
        }
        Command::Seed => {
            let added = actions::seed_categories(&db).context("unable to seed categories")?;
            println!("Added {} categories", added);
        }
        Command::AddCategory { type_ } => {
            let category = actions::add_category(&db, &type_)?;
            println!("{} ({})", category.id, category.type_);
        }
        Command::Categories => categories(&db)?,
        Command::Questions { category } => questions(&db, category)?,
        Command::DeleteQuestion { id } => del_question(&db, id)?,
    }
    Ok(())
}

fn categories(db: &PgConnection) -> Result<(), failure::Error> {
    let categories = actions::get_categories(db).context("unable to get categories")?;
    for category in categories {
        println!("{} ({})", category.id, category.type_);
    }
    Ok(())
}

fn questions(db: &PgConnection, category: Option<i32>) -> Result<(), failure::Error> {
    let questions = match category {
        Some(category) => actions::get_category_questions(db, category),
        None => actions::get_questions(db),
    }
    .context("unable to get questions")?;
    for q in questions {
        println!(
            "{} [{}/{}] {} ({})",
            q.id, q.category, q.difficulty, q.question, q.answer
        );
    }
    Ok(())
}

fn del_question(db: &PgConnection, id: i32) -> Result<(), failure::Error> {
    if actions::delete_question(db, id)? == 0 {
        failure::bail!("Question {} not found", id);
    }
    println!("Deleted question {}", id);
    Ok(())
}
