#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mockroster::{
    generator::{ErrorKind, RollNumberAssignment, RosterError, DEFAULT_ROLL_LENGTH},
    io,
    profile::{Profile, ProfileStore, DEFAULT_PROFILES_DIR},
    report::{render_summary, ReportRenderer, TextReport, DEFAULT_PREVIEW_ROWS},
    storage::{FileRosterStore, MergeMode, RosterStore},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Générateur de données d'examen blanc (centres × shifts × candidats démo)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des profils JSON
    #[arg(long, global = true, default_value = DEFAULT_PROFILES_DIR)]
    profiles_dir: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le roster fictif et l'exporter
    Generate {
        /// Profil à utiliser (les options ci-dessous le surchargent)
        #[arg(long)]
        profile: Option<String>,
        /// Table des centres (.csv, .xlsx, .xls, .xlsb, .ods)
        #[arg(long)]
        centres: Option<PathBuf>,
        /// Date de base, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        /// liste "Training 1, Mock 1, Mock 2"
        #[arg(long)]
        shifts: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        roll_length: Option<u16>,
        /// Fichier de sortie (.xlsx ajouté si aucune extension connue)
        #[arg(long)]
        out: Option<String>,
        /// fresh (écrase) ou append (ajoute à la suite du roster existant)
        #[arg(long)]
        mode: Option<MergeMode>,
        /// Roster existant à mettre en tête (mode append ; défaut : le fichier de sortie)
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Nombre de lignes affichées en aperçu
        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        preview: usize,
        /// Export CSV de la table des rolls (optionnel)
        #[arg(long)]
        roll_table: Option<PathBuf>,
    },

    /// Afficher la table des numéros de roll
    RollNumbers {
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
        roll_length: u16,
    },

    /// Vérifier une table de centres
    Check {
        #[arg(long)]
        centres: PathBuf,
    },

    /// Gérer les profils de génération
    Profile {
        #[command(subcommand)]
        cmd: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// Enregistrer un profil
    Save {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        shifts: String,
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
        roll_length: u16,
        #[arg(long, default_value_t = MergeMode::Fresh)]
        mode: MergeMode,
        #[arg(long)]
        centres: Option<PathBuf>,
        #[arg(long)]
        existing: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Lister les profils
    List,
    /// Afficher un profil (JSON)
    Show {
        #[arg(long)]
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
    };

    std::process::exit(code);
}

// 2 = saisie manquante, 3 = schéma, 4 = source introuvable, 5 = saisie invalide
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RosterError>().map(RosterError::kind) {
        Some(ErrorKind::MissingInput) => 2,
        Some(ErrorKind::Schema) => 3,
        Some(ErrorKind::SourceUnavailable) => 4,
        Some(ErrorKind::InvalidInput) => 5,
        None => 1,
    }
}

fn run(cli: Cli) -> Result<i32> {
    let profiles = ProfileStore::new(&cli.profiles_dir);

    match cli.cmd {
        Commands::Generate {
            profile,
            centres,
            date,
            shifts,
            roll_length,
            out,
            mode,
            existing,
            preview,
            roll_table,
        } => {
            let base = match profile {
                Some(id) => Some(profiles.load(&id)?),
                None => None,
            };

            let centres = centres
                .or_else(|| base.as_ref().and_then(|p| p.centres.clone()))
                .ok_or_else(|| RosterError::SourceUnavailable {
                    location: "centre table".into(),
                    reason: "no file given (use --centres)".into(),
                })?;
            let Some(date) = date.or(base.as_ref().map(|p| p.base_date)) else {
                bail!("no base date given (use --date YYYY-MM-DD)");
            };
            let out = match out {
                Some(name) => io::normalize_output_name(&name),
                None => base
                    .as_ref()
                    .and_then(|p| p.output.clone())
                    .unwrap_or_else(|| PathBuf::from(io::DEFAULT_OUTPUT_NAME)),
            };

            // profil effectif : options de la ligne de commande > profil > défauts
            let settings = Profile {
                id: base.as_ref().map_or_else(|| "cli".into(), |p| p.id.clone()),
                name: base.as_ref().map_or_else(|| "cli".into(), |p| p.name.clone()),
                description: None,
                base_date: date,
                shifts: match shifts {
                    Some(raw) => raw.split(',').map(str::to_string).collect(),
                    None => base.as_ref().map(|p| p.shifts.clone()).unwrap_or_default(),
                },
                roll_length: roll_length
                    .map(usize::from)
                    .or(base.as_ref().map(|p| p.roll_length))
                    .unwrap_or(DEFAULT_ROLL_LENGTH),
                mode: mode.or(base.as_ref().map(|p| p.mode)).unwrap_or_default(),
                centres: Some(centres.clone()),
                existing: existing.or_else(|| base.as_ref().and_then(|p| p.existing.clone())),
                output: Some(out.clone()),
            };

            let generator = settings.generator()?;
            // valide la largeur avant toute lecture de fichier
            generator.roll_numbers()?;

            let centres = io::import_centres(&centres)?;

            let prefix = match (settings.mode, settings.existing) {
                (MergeMode::Fresh, Some(path)) => {
                    bail!("--existing {} requires --mode append", path.display())
                }
                (MergeMode::Fresh, None) => None,
                (MergeMode::Append, Some(path)) => Some(io::import_existing_roster(&path)?),
                (MergeMode::Append, None) => {
                    FileRosterStore::open(&out).existing_for(MergeMode::Append)?
                }
            };

            let generation = generator.generate(&centres, prefix)?;
            FileRosterStore::open(&out).save(&generation.rows)?;

            if let Some(path) = roll_table {
                io::export_roll_numbers_csv(path, &generation.roll_numbers)?;
            }

            println!(
                "Mock data generated: {} row(s), {} new -> {}",
                generation.rows.len(),
                generation.new_rows().len(),
                out.display()
            );
            if preview > 0 {
                print!("\n{}", render_summary(&generation, preview, &TextReport));
            }
            Ok(0)
        }
        Commands::RollNumbers { roll_length } => {
            let rolls = RollNumberAssignment::new(usize::from(roll_length))?;
            print!("{}", TextReport.roll_table(&rolls));
            Ok(0)
        }
        Commands::Check { centres } => {
            let records = io::import_centres(&centres)?;
            println!(
                "OK: {} centre(s) in {}",
                records.len(),
                centres.display()
            );
            Ok(0)
        }
        Commands::Profile { cmd } => run_profile(&profiles, cmd),
    }
}

fn run_profile(profiles: &ProfileStore, cmd: ProfileCommands) -> Result<i32> {
    match cmd {
        ProfileCommands::Save {
            id,
            name,
            description,
            date,
            shifts,
            roll_length,
            mode,
            centres,
            existing,
            out,
        } => {
            let profile = Profile {
                id,
                name,
                description,
                base_date: date,
                shifts: shifts
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                roll_length: usize::from(roll_length),
                mode,
                centres,
                existing,
                output: out.map(|p| io::normalize_output_name(&p.to_string_lossy())),
            };
            let path = profiles.save(&profile)?;
            println!("Profile {} saved to {}", profile.id, path.display());
            Ok(0)
        }
        ProfileCommands::List => {
            let infos = profiles.list()?;
            if infos.is_empty() {
                println!("No profiles in {}", profiles.dir().display());
            }
            for info in infos {
                let modified = info
                    .modified
                    .map(|m| m.to_rfc3339())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{} | {} | {} shift(s) from {} | {}",
                    info.profile.id,
                    info.profile.name,
                    info.profile.shifts.len(),
                    info.profile.base_date,
                    modified
                );
            }
            Ok(0)
        }
        ProfileCommands::Show { id } => {
            let profile = profiles.load(&id)?;
            let json = serde_json::to_string_pretty(&profile).context("serializing profile")?;
            println!("{json}");
            Ok(0)
        }
    }
}
