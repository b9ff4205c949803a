use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use lcc::{CheckParams, ExpirationThresholds, SignatureAlgorithmSet};

/// Local Certificate Check
#[derive(Debug, Default, Parser)]
#[command(author, about, version)]
pub struct Opts {
    /// Path to the certificate file, PEM or DER
    #[arg(short, long)]
    pub file: PathBuf,
    /// Warning threshold in days before expiration, requires --critical
    #[arg(short, long)]
    pub warning: Option<i64>,
    /// Critical threshold in days before expiration, requires --warning
    #[arg(short, long)]
    pub critical: Option<i64>,
    /// Expected issuer, e.g. /C=US/O=Example/CN=Example CA
    #[arg(short, long)]
    pub issuer: Option<String>,
    /// Allowed signature algorithms separated with comma,
    /// e.g. sha256withrsaencryption,ed25519
    #[arg(short, long = "signature-algorithms")]
    pub signature_algorithms: Option<String>,
    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
    /// Verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl Opts {
    /// Validate options and turn them into check parameters
    pub fn check_params(&self) -> anyhow::Result<CheckParams> {
        let thresholds = match (self.warning, self.critical) {
            (Some(warning), Some(critical)) => {
                match ExpirationThresholds::from_days(warning, critical) {
                    Some(t) => Some(t),
                    None => bail!(
                        "invalid thresholds: warning must not be smaller than critical and both must be positive, got {warning} {critical}"
                    ),
                }
            }
            (None, None) => None,
            _ => bail!("--warning and --critical must be given together"),
        };

        let issuer = match &self.issuer {
            Some(issuer) if issuer.trim().is_empty() => bail!("issuer must not be empty"),
            Some(issuer) => Some(issuer.clone()),
            None => None,
        };

        let signature_algorithms = match &self.signature_algorithms {
            Some(list) => match SignatureAlgorithmSet::new(list.split(',')) {
                Some(set) => Some(set),
                None => bail!("signature algorithm list must not be empty"),
            },
            None => None,
        };

        Ok(CheckParams {
            thresholds,
            signature_algorithms,
            issuer,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_opts() -> Opts {
        Opts {
            file: PathBuf::from("cert.pem"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_plain_validity() {
        let params = build_opts().check_params().unwrap();
        assert!(params.thresholds.is_none());
        assert!(params.signature_algorithms.is_none());
        assert!(params.issuer.is_none());
    }

    #[test]
    fn test_thresholds() {
        let mut opts = build_opts();
        opts.warning = Some(30);
        opts.critical = Some(5);
        let params = opts.check_params().unwrap();
        let thresholds = params.thresholds.unwrap();
        assert_eq!(thresholds.warning, 30 * 86_400);
        assert_eq!(thresholds.critical, 5 * 86_400);
    }

    #[test]
    fn test_thresholds_must_be_paired() {
        let mut opts = build_opts();
        opts.warning = Some(30);
        assert!(opts.check_params().is_err());

        let mut opts = build_opts();
        opts.critical = Some(5);
        assert!(opts.check_params().is_err());
    }

    #[test]
    fn test_thresholds_invariant() {
        let mut opts = build_opts();
        opts.warning = Some(5);
        opts.critical = Some(30);
        assert!(opts.check_params().is_err());

        let mut opts = build_opts();
        opts.warning = Some(30);
        opts.critical = Some(0);
        assert!(opts.check_params().is_err());
    }

    #[test]
    fn test_empty_issuer() {
        let mut opts = build_opts();
        opts.issuer = Some("  ".to_string());
        assert!(opts.check_params().is_err());
    }

    #[test]
    fn test_signature_algorithms() {
        let mut opts = build_opts();
        opts.signature_algorithms = Some("SHA256WithRSAEncryption,ed25519".to_string());
        let params = opts.check_params().unwrap();
        let set = params.signature_algorithms.unwrap();
        assert!(set.contains("sha256withrsaencryption"));
        assert!(set.contains("ed25519"));
    }

    #[test]
    fn test_empty_signature_algorithms() {
        let mut opts = build_opts();
        opts.signature_algorithms = Some(", ,".to_string());
        assert!(opts.check_params().is_err());
    }
}
