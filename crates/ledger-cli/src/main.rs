use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ledger_core::{
    is_valid_proof, pow::proof_digest, validate_chain, Block, Difficulty, Ledger, LedgerConfig,
    Transaction,
};
use serde::Serialize;
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Drive a single-node proof-of-work ledger from the command line")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct PowArgs {
    /// Leading zero hex characters required of each proof digest
    #[arg(long, default_value = "3", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// Search proofs on all cores
    #[arg(long)]
    parallel: bool,
}

impl From<PowArgs> for LedgerConfig {
    fn from(args: PowArgs) -> Self {
        LedgerConfig::default()
            .with_difficulty(args.difficulty)
            .with_parallel(args.parallel)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Queue transactions, mine blocks and print the resulting chain as JSON
    Simulate {
        /// Transaction as sender:recipient:amount (repeatable)
        #[arg(long = "tx", value_parser = parse_tx)]
        txs: Vec<Transaction>,
        /// Number of blocks to mine after genesis
        #[arg(long, default_value_t = 1)]
        blocks: u32,
        #[command(flatten)]
        pow: PowArgs,
    },
    /// Search for a proof extending a block
    Prove {
        #[arg(long)]
        last_proof: u64,
        #[arg(long)]
        prev_hash: String,
        #[command(flatten)]
        pow: PowArgs,
    },
    /// Check a candidate proof; exits non-zero when it is invalid
    Check {
        #[arg(long)]
        proof: u64,
        #[arg(long)]
        last_proof: u64,
        #[arg(long)]
        prev_hash: String,
        #[arg(long, default_value = "3", value_parser = parse_difficulty)]
        difficulty: Difficulty,
    },
    /// Validate a chain previously printed by `simulate`
    Verify {
        /// Path to the chain JSON
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "3", value_parser = parse_difficulty)]
        difficulty: Difficulty,
    },
}

#[derive(Serialize)]
struct ProofOut {
    proof: u64,
    digest: String,
}

#[derive(Serialize)]
struct VerifyOut {
    valid: bool,
    height: usize,
    tip_hash: String,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let zeros: u32 = s.parse().map_err(|e| format!("{e}"))?;
    Difficulty::new(zeros).map_err(|e| e.to_string())
}

fn parse_tx(s: &str) -> Result<Transaction, String> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(sender), Some(recipient), Some(amount)) => {
            let amount: f64 = amount
                .parse()
                .map_err(|e| format!("bad amount {amount:?}: {e}"))?;
            Ok(Transaction::new(sender, recipient, amount))
        }
        _ => Err(format!("expected sender:recipient:amount, got {s:?}")),
    }
}

fn main() -> Result<ExitCode> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate { txs, blocks, pow } => {
            let mut ledger = Ledger::with_config(pow.into());
            for tx in txs {
                let position = ledger.submit_transaction(tx);
                info!("transaction queued for block {position}");
            }
            for _ in 0..blocks {
                let block = ledger.mine()?;
                info!("block {} hash {}", block.index, block.hash());
            }
            println!("{}", serde_json::to_string_pretty(ledger.chain())?);
        }
        Command::Prove {
            last_proof,
            prev_hash,
            pow,
        } => {
            let proof = if pow.parallel {
                ledger_core::mine::find_proof_parallel(last_proof, &prev_hash, pow.difficulty)
            } else {
                ledger_core::find_proof(last_proof, &prev_hash, pow.difficulty)
            };
            let digest = hex::encode(proof_digest(proof, last_proof, &prev_hash));
            println!("{}", serde_json::to_string_pretty(&ProofOut { proof, digest })?);
        }
        Command::Check {
            proof,
            last_proof,
            prev_hash,
            difficulty,
        } => {
            if is_valid_proof(proof, last_proof, &prev_hash, difficulty) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Verify { input, difficulty } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading chain from {}", input.display()))?;
            let blocks: Vec<Block> = serde_json::from_str(&text)
                .with_context(|| format!("parsing chain json in {}", input.display()))?;
            validate_chain(&blocks, difficulty).context("chain failed validation")?;
            let tip_hash = blocks.last().map(Block::hash).unwrap_or_default();
            let out = VerifyOut {
                valid: true,
                height: blocks.len(),
                tip_hash,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
