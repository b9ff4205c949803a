//! Decoded-certificate capability and attribute extractors

use thiserror::Error;

/// The certificate structure exposes no issuer at all
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("certificate has no issuer")]
pub struct IssuerUnavailableError;

/// The certificate structure exposes no signature algorithm
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("certificate has no signature algorithm")]
pub struct SignatureAlgorithmUnavailableError;

/// A decoded X.509 certificate, as provided by an external loader.
///
/// The core never touches the filesystem or raw PEM/DER bytes; it only
/// borrows a value implementing this trait for one evaluation.
pub trait Certificate {
    /// `notBefore` as an ASN.1 time string
    fn not_before(&self) -> &str;
    /// `notAfter` as an ASN.1 time string
    fn not_after(&self) -> &str;
    /// Issuer RDN (type, value) pairs in certificate order, or `None`
    /// when the structure exposes no issuer
    fn issuer_components(&self) -> Option<Vec<(String, String)>>;
    /// Signature-algorithm name as exposed by the structure
    fn signature_algorithm(&self) -> Option<String>;
}

/// Format the issuer as `/TYPE1=VALUE1/TYPE2=VALUE2/...`
///
/// An issuer with zero RDNs yields `"/"`, which is distinct from a
/// certificate exposing no issuer structure at all.
pub fn format_issuer<C>(cert: &C) -> Result<String, IssuerUnavailableError>
where
    C: Certificate,
{
    let components = cert.issuer_components().ok_or(IssuerUnavailableError)?;
    if components.is_empty() {
        return Ok("/".to_string());
    }
    let mut formatted = String::new();
    for (attr_type, value) in components {
        formatted.push('/');
        formatted.push_str(&attr_type);
        formatted.push('=');
        formatted.push_str(&value);
    }
    Ok(formatted)
}

/// Signature-algorithm name exactly as exposed, no case normalization
pub fn read_signature_algorithm<C>(
    cert: &C,
) -> Result<String, SignatureAlgorithmUnavailableError>
where
    C: Certificate,
{
    cert.signature_algorithm()
        .ok_or(SignatureAlgorithmUnavailableError)
}

#[cfg(test)]
mod test {
    use super::*;

    struct FakeCertificate {
        issuer: Option<Vec<(String, String)>>,
        signature_algorithm: Option<String>,
    }

    impl Certificate for FakeCertificate {
        fn not_before(&self) -> &str {
            "20200101000000Z"
        }

        fn not_after(&self) -> &str {
            "20300101000000Z"
        }

        fn issuer_components(&self) -> Option<Vec<(String, String)>> {
            self.issuer.clone()
        }

        fn signature_algorithm(&self) -> Option<String> {
            self.signature_algorithm.clone()
        }
    }

    #[test]
    fn test_format_issuer() {
        let cert = FakeCertificate {
            issuer: Some(vec![
                ("C".to_string(), "US".to_string()),
                ("O".to_string(), "Example".to_string()),
                ("CN".to_string(), "Example CA".to_string()),
            ]),
            signature_algorithm: None,
        };
        assert_eq!(format_issuer(&cert).unwrap(), "/C=US/O=Example/CN=Example CA");
    }

    #[test]
    fn test_format_issuer_empty_rdn_sequence() {
        let cert = FakeCertificate {
            issuer: Some(vec![]),
            signature_algorithm: None,
        };
        assert_eq!(format_issuer(&cert).unwrap(), "/");
    }

    #[test]
    fn test_format_issuer_unavailable() {
        let cert = FakeCertificate {
            issuer: None,
            signature_algorithm: None,
        };
        assert_eq!(format_issuer(&cert).unwrap_err(), IssuerUnavailableError);
    }

    #[test]
    fn test_read_signature_algorithm() {
        let cert = FakeCertificate {
            issuer: None,
            signature_algorithm: Some("SHA256WithRSAEncryption".to_string()),
        };
        assert_eq!(
            read_signature_algorithm(&cert).unwrap(),
            "SHA256WithRSAEncryption"
        );
    }

    #[test]
    fn test_read_signature_algorithm_unavailable() {
        let cert = FakeCertificate {
            issuer: None,
            signature_algorithm: None,
        };
        assert_eq!(
            read_signature_algorithm(&cert).unwrap_err(),
            SignatureAlgorithmUnavailableError
        );
    }
}
