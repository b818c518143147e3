use alloy_consensus::TxEnvelope;
use alloy_eips::eip2718::{Decodable2718, Encodable2718};
use alloy_primitives::{Bytes, B256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use stateproof_kernel::config::DecodeLimits;
use stateproof_kernel::container::ContainerEnvelope;
use stateproof_kernel::error::{DecodeError, DecodeKind};
use stateproof_kernel::inflate::inflate;
use stateproof_kernel::pipeline::build_request;
use stateproof_kernel::trace::{decode_trace, StructuredTrace};
use stateproof_kernel::types::ExecutionWitness;
use stateproof_node::network::client::{VerifyClient, DEFAULT_CLIENT_TIMEOUT};
use stateproof_node::registry::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "stateproof-verify", author, version, about = "Build, inspect and submit verification envelopes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode an envelope offline and print a JSON summary
    Inspect {
        /// Path to the envelope file
        file: PathBuf,
    },
    /// Build an envelope from a JSON description
    Pack {
        /// Path to the JSON description
        spec: PathBuf,

        /// Where to write the envelope
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Send an envelope to a node and print the verdict
    Submit {
        /// Path to the envelope file
        file: PathBuf,

        /// Full verification URL, e.g. http://127.0.0.1:8555/verifyV1
        #[arg(long)]
        endpoint: String,
    },
}

/// Input to `pack`. Byte fields are 0x-prefixed hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackSpec {
    pre_state_root: B256,
    post_state_root: B256,
    gas_used: u64,
    #[serde(default)]
    witness: ExecutionWitness,
    /// EIP-2718 encoded transactions.
    #[serde(default)]
    transactions: Vec<Bytes>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct WitnessSizes {
    state: usize,
    codes: usize,
    keys: usize,
    headers: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_state_root: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_state_root: Option<B256>,
    /// Decimal, as claimed; may exceed 64 bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_used: Option<String>,
    envelope_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    compressed_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inflated_bytes: Option<usize>,
    transactions: Vec<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    witness: Option<WitnessSizes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decode_kind: Option<DecodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl EnvelopeSummary {
    fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    fn fail(mut self, err: DecodeError) -> Self {
        self.decode_kind = Some(err.kind());
        self.error = Some(err.to_string());
        self
    }
}

/// Decode as far as possible, recording the first failing layer.
fn summarize(raw: &[u8], limits: &DecodeLimits) -> EnvelopeSummary {
    let mut summary = EnvelopeSummary {
        envelope_bytes: raw.len(),
        ..Default::default()
    };

    let envelope = match ContainerEnvelope::decode_bounded(raw, limits) {
        Ok(envelope) => envelope,
        Err(e) => return summary.fail(e.into()),
    };
    summary.pre_state_root = Some(envelope.pre_state_root);
    summary.post_state_root = Some(envelope.post_state_root);
    summary.gas_used = Some(envelope.gas_used.to_string());
    summary.compressed_bytes = Some(envelope.compressed_payload.len());

    if let Err(e) = envelope.gas_used_u64() {
        return summary.fail(e.into());
    }
    let inflated = match inflate(&envelope.compressed_payload, limits.max_inflated_bytes) {
        Ok(inflated) => inflated,
        Err(e) => return summary.fail(e.into()),
    };
    summary.inflated_bytes = Some(inflated.len());

    let trace = match decode_trace(&inflated) {
        Ok(trace) => trace,
        Err(e) => return summary.fail(e.into()),
    };
    summary.transactions = trace.transactions.iter().map(|tx| tx.trie_hash()).collect();
    summary.witness = Some(WitnessSizes {
        state: trace.witness.state.len(),
        codes: trace.witness.codes.len(),
        keys: trace.witness.keys.len(),
        headers: trace.witness.headers.len(),
    });
    summary
}

fn pack(spec: &PackSpec) -> Result<Vec<u8>> {
    let transactions = spec
        .transactions
        .iter()
        .enumerate()
        .map(|(i, raw)| -> Result<TxEnvelope> {
            let mut buf: &[u8] = raw;
            let tx = TxEnvelope::decode_2718(&mut buf).map_err(|e| anyhow::anyhow!("transaction {i}: {e}"))?;
            if !buf.is_empty() {
                anyhow::bail!("transaction {i}: {} trailing bytes", buf.len());
            }
            Ok(tx)
        })
        .collect::<Result<Vec<_>>>()?;

    let trace = StructuredTrace {
        witness: spec.witness.clone(),
        block_header: Default::default(),
        transactions,
    };
    build_request(spec.pre_state_root, spec.post_state_root, spec.gas_used, &trace)
        .context("Failed to encode envelope")
}

fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read envelope file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => {
            let raw = read_envelope(&file)?;
            let summary = summarize(&raw, &DecodeLimits::default());
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(if summary.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Pack { spec, output } => {
            let json = fs::read(&spec).with_context(|| format!("Failed to read {}", spec.display()))?;
            let spec: PackSpec = serde_json::from_slice(&json).context("Failed to parse pack description")?;
            let envelope = pack(&spec)?;
            fs::write(&output, &envelope).with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Wrote {} bytes to {}", envelope.len(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submit { file, endpoint } => {
            let raw = read_envelope(&file)?;
            let client = VerifyClient::new(DEFAULT_CLIENT_TIMEOUT, Registry::new())?;
            let verdict = client.verify_v1(raw, &endpoint).await?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            Ok(if verdict.is_accepted() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
