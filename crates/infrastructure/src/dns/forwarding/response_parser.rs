use super::record_type_map::RecordTypeMapper;
use dnswatch_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// Parsed upstream answer, reduced to what the monitor shows.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answers of the requested type, one text line each.
    pub lines: Vec<String>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a wire response, keeping only answers of `requested` type.
    pub fn parse(response_bytes: &[u8], requested: &RecordType) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let lines: Vec<String> = message
            .answers()
            .iter()
            .filter(|record| RecordTypeMapper::from_hickory(record.record_type()) == Some(*requested))
            .filter_map(Self::render)
            .collect();

        debug!(
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            kept = lines.len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            lines,
        })
    }

    /// One answer as a text line, the way `dig +short` prints it. SOA keeps
    /// the full answer line so the serial sits in the seventh field.
    pub fn render(record: &Record) -> Option<String> {
        match record.data() {
            RData::NS(ns) => Some(ns.to_utf8()),
            RData::PTR(ptr) => Some(ptr.to_utf8()),
            RData::A(a) => Some(a.0.to_string()),
            RData::MX(mx) => Some(format!("{} {}", mx.preference(), mx.exchange())),
            RData::TXT(txt) => Some(
                txt.txt_data()
                    .iter()
                    .map(|chunk| format!("\"{}\"", String::from_utf8_lossy(chunk)))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            RData::SOA(soa) => Some(format!(
                "{} {} {} SOA {} {} {} {} {} {} {}",
                record.name(),
                record.ttl(),
                record.dns_class(),
                soa.mname(),
                soa.rname(),
                soa.serial(),
                soa.refresh(),
                soa.retry(),
                soa.expire(),
                soa.minimum()
            )),
            _ => None,
        }
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
