use std::path::Path;

use anyhow::{anyhow, Context as _};
use lcc::Certificate;
use x509_parser::objects::{oid2abbrev, oid2sn, oid_registry};
use x509_parser::parse_x509_certificate;
use x509_parser::pem::parse_x509_pem;
use x509_parser::prelude::X509Certificate;

/// Owned snapshot of the certificate fields the checks consume,
/// detached from the parser's borrowed structures
#[derive(Debug)]
pub struct CertificateInfo {
    not_before: String,
    not_after: String,
    issuer: Vec<(String, String)>,
    signature_algorithm: Option<String>,
}

impl CertificateInfo {
    /// Load a certificate from a PEM or DER file
    pub fn load<P>(path: P) -> anyhow::Result<CertificateInfo>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("can't read certificate {}", path.display()))?;
        if data.starts_with(b"-----BEGIN") {
            let (_, pem) = parse_x509_pem(&data)
                .map_err(|e| anyhow!("can't parse PEM {}: {:?}", path.display(), e))?;
            let cert = pem
                .parse_x509()
                .map_err(|e| anyhow!("can't parse certificate {}: {:?}", path.display(), e))?;
            Ok(Self::from_x509(&cert))
        } else {
            let (_, cert) = parse_x509_certificate(&data)
                .map_err(|e| anyhow!("can't parse certificate {}: {:?}", path.display(), e))?;
            Ok(Self::from_x509(&cert))
        }
    }

    fn from_x509(cert: &X509Certificate<'_>) -> CertificateInfo {
        let registry = oid_registry();
        let issuer = cert
            .issuer()
            .iter_attributes()
            .map(|attr| {
                let attr_type = oid2abbrev(attr.attr_type(), registry)
                    .map(str::to_string)
                    .unwrap_or_else(|_| attr.attr_type().to_id_string());
                let value = attr.as_str().map(str::to_string).unwrap_or_default();
                (attr_type, value)
            })
            .collect();
        let signature_algorithm = oid2sn(&cert.signature_algorithm.algorithm, registry)
            .map(str::to_string)
            .ok()
            .or_else(|| Some(cert.signature_algorithm.algorithm.to_id_string()));
        CertificateInfo {
            not_before: generalized_time(cert.validity().not_before.to_datetime()),
            not_after: generalized_time(cert.validity().not_after.to_datetime()),
            issuer,
            signature_algorithm,
        }
    }
}

impl Certificate for CertificateInfo {
    fn not_before(&self) -> &str {
        &self.not_before
    }

    fn not_after(&self) -> &str {
        &self.not_after
    }

    fn issuer_components(&self) -> Option<Vec<(String, String)>> {
        Some(self.issuer.clone())
    }

    fn signature_algorithm(&self) -> Option<String> {
        self.signature_algorithm.clone()
    }
}

/// Render a parsed certificate timestamp back into the ASN.1
/// generalized-time layout the core decodes. The parser already
/// normalized it to UTC.
fn generalized_time(t: time::OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}Z",
        t.year(),
        t.month() as u8,
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}
