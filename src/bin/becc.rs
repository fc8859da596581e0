//! `becc` — a small CLI exposing the library's key, ECDSA, ECDH, and
//! hybrid-encryption operations over stdin/stdout.

use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use becc::context::EccContext;
use becc::ecdsa::Signature;
use becc::error::Error;
use becc::keys::{PrivateKey, PublicKey};
use becc::{ecdh, ecdsa, hybrid};
use clap::{Args, Parser, Subcommand};
use rand_core::OsRng;
use zeroize::Zeroize;

/// Basic elliptic curve cryptography tool implementing the most common
/// cryptographic operations.
#[derive(Parser)]
#[command(name = "becc", about = "Basic Elliptic Curve Cryptography")]
struct Cli {
    #[command(flatten)]
    shared: SharedArgs,

    /// Enable verbose (debug-level) logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SharedArgs {
    /// Elliptic curve to use.
    #[arg(short, long, global = true, default_value = "secp256k1")]
    curve: String,

    /// Private key in hex format.
    #[arg(short = 'k', long, global = true)]
    private_key: Option<String>,

    /// Public key in hex format.
    #[arg(short, long, global = true)]
    public_key: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Elliptic curve key operations.
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
    /// Elliptic curve digital signature algorithm.
    Ecdsa {
        #[command(subcommand)]
        command: EcdsaCommand,
    },
    /// Elliptic curve Diffie-Hellman algorithm.
    Ecdh {
        /// Peer public key in hex format.
        peer_public_key: String,
    },
    /// Hybrid encryption/decryption using elliptic curve + AES-GCM.
    Hybrid {
        #[command(subcommand)]
        command: HybridCommand,
    },
}

#[derive(Subcommand)]
enum KeyCommand {
    /// Generate a new elliptic curve key pair.
    Gen,
    /// Get the public key of a private key.
    Public,
}

#[derive(Subcommand)]
enum EcdsaCommand {
    /// Sign a message from stdin using ECDSA.
    Sign {
        /// Use deterministic signature generation (RFC 6979) instead of a
        /// fresh random nonce.
        #[arg(short, long, default_value_t = true)]
        deterministic: bool,
        /// Normalize the signature to use a low `s` value.
        #[arg(short, long, default_value_t = true)]
        low_s: bool,
    },
    /// Verify a signature using ECDSA, reading the message from stdin.
    Verify {
        /// Signature in hex format (`R(32) || S(32)`).
        signature: String,
    },
}

#[derive(Subcommand)]
enum HybridCommand {
    /// Hybrid-encrypt stdin for a peer public key.
    Encrypt {
        /// Peer public key in hex format.
        peer_public_key: String,
    },
    /// Hybrid-decrypt stdin using the configured private key.
    Decrypt,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::InvalidSignature) => {
            println!("invalid signature");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Library(Error),
    Io(io::Error),
    InvalidSignature,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::Library(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidSignature => write!(f, "invalid signature"),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        Self::Library(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn context_for(curve: &str) -> Result<Arc<EccContext>, CliError> {
    match curve {
        "secp256k1" => Ok(EccContext::secp256k1()),
        other => {
            tracing::warn!(curve = other, "unsupported curve requested");
            Err(CliError::Usage("invalid curve – supported values: secp256k1"))
        }
    }
}

fn parse_private_key(ctx: &Arc<EccContext>, shared: &SharedArgs) -> Result<PrivateKey, CliError> {
    let hex_str = shared
        .private_key
        .as_deref()
        .ok_or(CliError::Usage("private key not specified"))?;
    let mut bytes = hex::decode(hex_str).map_err(|_| CliError::Usage("invalid private key format"))?;
    let key = PrivateKey::from_bytes(ctx, &bytes);
    bytes.zeroize();
    Ok(key?)
}

fn parse_public_key(ctx: &Arc<EccContext>, shared: &SharedArgs) -> Result<PublicKey, CliError> {
    let hex_str = shared
        .public_key
        .as_deref()
        .ok_or(CliError::Usage("public key not specified"))?;
    parse_public_key_str(ctx, hex_str)
}

fn parse_public_key_str(ctx: &Arc<EccContext>, hex_str: &str) -> Result<PublicKey, CliError> {
    let bytes = hex::decode(hex_str).map_err(|_| CliError::Usage("invalid public key format"))?;
    Ok(PublicKey::from_sec1(ctx, &bytes)?)
}

fn parse_signature(hex_str: &str) -> Result<Signature, CliError> {
    let bytes = hex::decode(hex_str).map_err(|_| CliError::Usage("invalid signature format"))?;
    Ok(Signature::from_bytes(&bytes)?)
}

fn read_stdin() -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = context_for(&cli.shared.curve)?;

    match cli.command {
        Command::Key { command } => run_key(&ctx, &cli.shared, command),
        Command::Ecdsa { command } => run_ecdsa(&ctx, &cli.shared, command),
        Command::Ecdh { peer_public_key } => run_ecdh(&ctx, &cli.shared, &peer_public_key),
        Command::Hybrid { command } => run_hybrid(&ctx, &cli.shared, command),
    }
}

fn run_key(ctx: &Arc<EccContext>, shared: &SharedArgs, command: KeyCommand) -> Result<(), CliError> {
    match command {
        KeyCommand::Gen => {
            let sk = PrivateKey::generate(ctx, &mut OsRng)?;
            let pk = sk.public_key();
            println!("private key: {}", hex::encode(sk.to_bytes()));
            println!("public key: {}", hex::encode(pk.to_uncompressed()));
            Ok(())
        }
        KeyCommand::Public => {
            let sk = parse_private_key(ctx, shared)?;
            let pk = sk.public_key();
            println!("{}", hex::encode(pk.to_uncompressed()));
            Ok(())
        }
    }
}

fn run_ecdsa(ctx: &Arc<EccContext>, shared: &SharedArgs, command: EcdsaCommand) -> Result<(), CliError> {
    match command {
        EcdsaCommand::Sign { deterministic, low_s } => {
            let sk = parse_private_key(ctx, shared)?;
            let msg = read_stdin()?;

            let sig = if deterministic {
                ecdsa::sign_deterministic(&sk, &msg, low_s)
            } else {
                ecdsa::sign(&sk, &msg, low_s, &mut OsRng)?
            };

            println!("{}", hex::encode(sig.to_bytes()));
            Ok(())
        }
        EcdsaCommand::Verify { signature } => {
            let pk = parse_public_key(ctx, shared)?;
            let sig = parse_signature(&signature)?;
            let msg = read_stdin()?;

            if ecdsa::verify(&pk, &msg, &sig) {
                println!("valid signature");
                Ok(())
            } else {
                Err(CliError::InvalidSignature)
            }
        }
    }
}

fn run_ecdh(ctx: &Arc<EccContext>, shared: &SharedArgs, peer_public_key: &str) -> Result<(), CliError> {
    let peer_pub = parse_public_key_str(ctx, peer_public_key)?;
    let sk = parse_private_key(ctx, shared)?;

    let secret = ecdh::shared_secret(&sk, &peer_pub);
    println!("{}", hex::encode(secret));
    Ok(())
}

fn run_hybrid(ctx: &Arc<EccContext>, shared: &SharedArgs, command: HybridCommand) -> Result<(), CliError> {
    match command {
        HybridCommand::Encrypt { peer_public_key } => {
            let peer_pub = parse_public_key_str(ctx, &peer_public_key)?;
            let plaintext = read_stdin()?;
            let blob = hybrid::encrypt(&peer_pub, &plaintext, &mut OsRng)?;
            io::stdout().write_all(&blob)?;
            Ok(())
        }
        HybridCommand::Decrypt => {
            let sk = parse_private_key(ctx, shared)?;
            let blob = read_stdin()?;
            let plaintext = hybrid::decrypt(&sk, &blob)?;
            io::stdout().write_all(&plaintext)?;
            Ok(())
        }
    }
}
