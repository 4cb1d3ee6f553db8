use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mailverify::{
    ProbeOptions, SmtpProbe, SystemResolver, VerificationResult, VerificationStatus, Verifier,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailverify-cli")]
struct Cli {
    /// adresse à vérifier (omise si --stdin)
    email: Option<String>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    stdin: bool,

    /// format: human|json
    #[arg(long, default_value = "human")]
    format: String,

    /// port SMTP de la sonde
    #[arg(long, default_value_t = 25)]
    port: u16,

    /// nom annoncé dans HELO
    #[arg(long)]
    helo: Option<String>,

    /// expéditeur d'enveloppe pour MAIL FROM
    #[arg(long)]
    mail_from: Option<String>,

    /// timeout réseau en secondes (DNS et SMTP)
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let timeout = Duration::from_secs(cli.timeout);
    let mut options = ProbeOptions {
        port: cli.port,
        connect_timeout: timeout,
        command_timeout: timeout,
        ..ProbeOptions::default()
    };
    if let Some(helo) = cli.helo {
        options.helo_host = helo;
    }
    if let Some(mail_from) = cli.mail_from {
        options.mail_from = mail_from;
    }

    let verifier = Verifier::new(SystemResolver::new(timeout), SmtpProbe::new(options));

    let mut results: Vec<VerificationResult> = Vec::new();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let email = line.context("read stdin")?;
            results.push(verifier.verify(email.trim()));
        }
    } else if let Some(email) = cli.email.as_deref() {
        results.push(verifier.verify(email));
    } else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    match cli.format.as_str() {
        "human" => {
            for r in &results {
                let tag = match r.status {
                    VerificationStatus::Valid => "[VALID]        ",
                    VerificationStatus::Undeliverable => "[UNDELIVERABLE]",
                    VerificationStatus::Error => "[ERROR]        ",
                };
                println!("{tag} {} :: {}", r.email, r.message);
                if let Some(mx) = r.details.mx_record.as_deref() {
                    println!("                mx: {mx}");
                }
                if let Some(msg) = r.details.smtp_message.as_deref() {
                    println!("                smtp: {msg}");
                }
            }
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        other => {
            eprintln!("unknown --format '{}', use: human|json", other);
            std::process::exit(1);
        }
    }

    // codes de sortie : 0 valid, 2 sinon, 1 fatal
    let all_valid = results
        .iter()
        .all(|r| matches!(r.status, VerificationStatus::Valid));
    if !all_valid {
        std::process::exit(2);
    }
    Ok(())
}
