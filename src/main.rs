use dotenv::dotenv;
use log::{debug, error};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use wildpedia::catalog::labels::{danger_label, iucn_color};
use wildpedia::catalog::source::DirSource;
use wildpedia::catalog::{Animal, Catalog, CatalogStore, SenseKind, Stat};
use wildpedia::config::Settings;
use wildpedia::quiz::session::{AnswerOutcome, Phase};
use wildpedia::quiz::{QuizResult, Rating};
use wildpedia::QuizSession;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type Input = Lines<BufReader<Stdin>>;

const GREETING_TEXT: &str = "Welcome to Wildpedia! Type `help` to see what you can do.";
const HELP_TEXT: &str = "Commands:
  quiz                         play an animal quiz
  animal <id>                  show one animal
  search <text>                find animals by name
  status <code>                animals with an IUCN status (e.g. CR)
  top <speed|weight|lifespan>  top 10 animals by a stat
  quit                         leave";

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv().is_ok();
    pretty_env_logger::init();
    if !dotenv_loaded {
        debug!("No .env file found, using the process environment");
    }
    log::info!("Starting Wildpedia...");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    println!("Loading the catalog from {}", settings.data_dir.display());
    let store = CatalogStore::new(DirSource::new(&settings.data_dir));
    let catalog = match store.load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{}", e);
            if let Some(cause) = std::error::Error::source(&e) {
                error!("caused by: {}", cause);
            }
            std::process::exit(1);
        }
    };
    println!("Catalog loaded: {} animals", catalog.len());

    let rng = match settings.quiz_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = QuizSession::new(rng).with_length(settings.quiz_length);

    if let Err(e) = run(catalog, &mut session).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(catalog: &Catalog, session: &mut QuizSession) -> HandlerResult {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", GREETING_TEXT);

    loop {
        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command.to_string(), arg.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "" => continue,
            "help" => println!("{}", HELP_TEXT),
            "quiz" => play_quiz(catalog, session, &mut input).await?,
            "animal" => show_animal(catalog, &arg),
            "search" => list("Matches", catalog.search(&arg)),
            "status" => show_status(catalog, &arg),
            "top" => show_top(catalog, &arg),
            "quit" | "exit" => return Ok(()),
            _ => println!("Unknown command `{}`. Type `help`.", command),
        }
    }
}

async fn play_quiz(catalog: &Catalog, session: &mut QuizSession, input: &mut Input) -> HandlerResult {
    session.start(catalog);

    while session.phase() == Phase::Active {
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        println!(
            "\nQuestion {} of {} (score {})\n{}",
            session.position() + 1,
            session.total(),
            session.score(),
            question.text
        );
        for (i, answer) in question.answers.iter().enumerate() {
            println!("  {}) {}", i + 1, answer.text);
        }

        while !session.is_answered() {
            let Some(line) = input.next_line().await? else {
                return Ok(());
            };
            let choice = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| question.answers.get(i));
            let Some(choice) = choice else {
                println!("Please pick a number from 1 to {}", question.answers.len());
                continue;
            };

            match session.answer(&choice.animal_id) {
                AnswerOutcome::Correct => println!("Correct! {}", question.explanation),
                AnswerOutcome::Incorrect { .. } => {
                    println!("Wrong! {}", question.explanation)
                }
                AnswerOutcome::Rejected => continue,
            }
        }

        session.advance();
    }

    if let Some(result) = session.result() {
        print_result(result);
    }
    session.restart();
    Ok(())
}

fn print_result(result: QuizResult) {
    let message = match result.rating() {
        Rating::Perfect => "Perfect score!",
        Rating::Great => "Great job!",
        Rating::Good => "Good effort!",
        Rating::TryAgain => "Keep exploring and try again!",
    };
    println!(
        "\nQuiz over! You answered {} of {} correctly ({}%). {}",
        result.score,
        result.total,
        result.percent(),
        message
    );
}

fn show_animal(catalog: &Catalog, id: &str) {
    let Some(animal) = catalog.animal(id) else {
        println!("No animal with id `{}`", id);
        return;
    };

    println!(
        "{} {} ({})",
        animal.emoji.as_deref().unwrap_or(""),
        animal.display_name(),
        animal.class
    );
    if let Some(status) = &animal.conservation_status {
        println!("  Status: {} [{}]", status, iucn_color(status));
    }
    for stat in Stat::ALL {
        let value = animal.stat(stat);
        if value > 0.0 {
            println!("  {:?}: {} {}", stat, value, stat.unit());
        }
    }
    if animal.senses.is_some() {
        let ratings: Vec<String> = SenseKind::ALL
            .iter()
            .map(|k| format!("{:?} {}", k, animal.sense(*k)))
            .collect();
        println!("  Senses: {}", ratings.join(", "));
        println!("  Overall sense score: {}", animal.overall_sense_score());
    }
    if let Some(level) = animal.danger_level() {
        println!("  Danger to humans: {}/5 ({})", level, danger_label(level));
    }
    for fact in &animal.fun_facts {
        println!("  * {}", fact);
    }
    list("Related", catalog.related_animals(&animal.id));
}

fn show_status(catalog: &Catalog, code: &str) {
    let view = catalog.status_view(code);
    let label = view
        .status
        .and_then(|s| s.name_key.as_deref())
        .unwrap_or(code);
    list(label, view.animals);
}

fn show_top(catalog: &Catalog, stat: &str) {
    let stat = match stat {
        "speed" => Stat::Speed,
        "weight" => Stat::Weight,
        "lifespan" => Stat::Lifespan,
        _ => {
            println!("Pick one of: speed, weight, lifespan");
            return;
        }
    };
    for (i, animal) in catalog.top_by(stat, 10).iter().enumerate() {
        println!(
            "  {}. {} {} {}",
            i + 1,
            animal.display_name(),
            animal.stat(stat),
            stat.unit()
        );
    }
}

fn list(title: &str, animals: Vec<&Animal>) {
    println!("{} ({}):", title, animals.len());
    for animal in animals {
        println!("  {} [{}]", animal.display_name(), animal.id);
    }
}
