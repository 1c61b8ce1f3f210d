use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use ward_core::{
    config::{page_size_from_env_value, people_source_url_from_env_value, seed_from_env_value},
    generate_all_admission_data, AdmissionStatus, CoreConfig, HttpPeopleSource,
    PatientAdmission, PatientError, PatientQuery, PatientService,
};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward hospital admission CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SourceArgs {
    /// People source URL (defaults to WARD_PEOPLE_URL, then the public demo endpoint)
    #[arg(long)]
    url: Option<String>,
    /// Seed for reproducible admission data (defaults to WARD_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize admission data and print it as JSON
    Generate {
        /// Number of records
        #[arg(allow_hyphen_values = true)]
        total: i64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fetch people, synthesize admissions and print every patient
    Load {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Fetch people and print dashboard numbers and statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Fetch people and print one page of the patient table
    List {
        /// Admitted, Discharged or "Under Observation"
        #[arg(long)]
        status: Option<AdmissionStatus>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn resolve_config(source: &SourceArgs) -> Result<CoreConfig, PatientError> {
    let url = people_source_url_from_env_value(
        source
            .url
            .clone()
            .or_else(|| std::env::var("WARD_PEOPLE_URL").ok()),
    );
    let page_size = page_size_from_env_value(std::env::var("WARD_PAGE_SIZE").ok())?;
    let seed = match source.seed {
        Some(seed) => Some(seed),
        None => seed_from_env_value(std::env::var("WARD_SEED").ok())?,
    };
    CoreConfig::new(url, page_size, seed)
}

async fn load_service(source: &SourceArgs) -> Result<PatientService, PatientError> {
    let cfg = resolve_config(source)?;
    let mut service = PatientService::new(&cfg);
    let people = HttpPeopleSource::new(cfg.people_source_url())?;
    service.load_from(&people, &mut cfg.rng()).await?;
    Ok(service)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PatientError> {
    let json = serde_json::to_string_pretty(value).map_err(PatientError::Serialization)?;
    println!("{json}");
    Ok(())
}

fn print_patients(patients: &[PatientAdmission]) {
    println!(
        "{:>4}  {:<28} {:>3}  {:<6}  {:<17}  {:>4}  {:<3}",
        "ID", "Name", "Age", "Gender", "Status", "Room", "BG"
    );
    for p in patients {
        println!(
            "{:>4}  {:<28} {:>3}  {:<6}  {:<17}  {:>4}  {:<3}",
            p.generated_id,
            p.full_name(),
            p.age,
            p.gender,
            p.status,
            p.room_number.as_ref().map_or("-", |r| r.as_str()),
            p.blood_group
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ward_core=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { total, seed }) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let admissions = generate_all_admission_data(total, &mut rng)?;
            print_json(&admissions)?;
        }
        Some(Commands::Load { source }) => {
            let service = load_service(&source).await?;
            if service.is_empty() {
                println!("No patients found.");
            } else {
                print_patients(service.list());
            }
        }
        Some(Commands::Stats { source }) => {
            let service = load_service(&source).await?;
            let dashboard = service.dashboard();
            println!("Total patients:     {}", dashboard.total_patients);
            println!("Currently admitted: {}", dashboard.currently_admitted);
            println!("Occupied rooms:     {}", dashboard.occupied_rooms);
            println!("Free rooms:         {}", dashboard.free_rooms);
            print_json(&service.statistics())?;
        }
        Some(Commands::List {
            status,
            search,
            page,
            source,
        }) => {
            let service = load_service(&source).await?;
            let result = service.query(&PatientQuery {
                status,
                search,
                page: Some(page),
            });
            if result.patients.is_empty() {
                println!("No patients found.");
            } else {
                print_patients(&result.patients);
                println!(
                    "Page {} of {} ({} matching)",
                    result.page, result.total_pages, result.total_matches
                );
            }
        }
        None => {
            println!("Use 'ward --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_accepts_negative_total_for_core_to_reject() {
        let cli = Cli::try_parse_from(["ward", "generate", "-3"]).expect("should parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Generate { total: -3, seed: None })
        ));
    }

    #[test]
    fn test_list_parses_status_names() {
        let cli = Cli::try_parse_from([
            "ward",
            "list",
            "--status",
            "under_observation",
            "--page",
            "2",
            "--seed",
            "7",
        ])
        .expect("should parse");
        match cli.command {
            Some(Commands::List {
                status,
                page,
                source,
                ..
            }) => {
                assert_eq!(status, Some(AdmissionStatus::UnderObservation));
                assert_eq!(page, 2);
                assert_eq!(source.seed, Some(7));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_explicit_url_wins_over_default() {
        let source = SourceArgs {
            url: Some("http://localhost:8080/users".into()),
            seed: Some(1),
        };
        let cfg = resolve_config(&source).expect("config should resolve");
        assert_eq!(cfg.people_source_url(), "http://localhost:8080/users");
        assert_eq!(cfg.seed(), Some(1));
    }
}
