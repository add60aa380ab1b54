#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

type Zone = HashMap<(String, RecordType), Vec<RData>>;

/// Mock DNS server for tests.
///
/// Answers from a fixed table keyed by (fully qualified name, type). With
/// `truncate_udp` every UDP answer is sent empty with the TC bit set and the
/// real answer is only available over TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
pub struct MockZone {
    records: Zone,
    rcode: Option<ResponseCode>,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, record_type: RecordType, data: RData) -> Self {
        self.records
            .entry((name.to_string(), record_type))
            .or_default()
            .push(data);
        self
    }

    /// Every answer carries `rcode` and no records.
    pub fn failing(mut self, rcode: ResponseCode) -> Self {
        self.rcode = Some(rcode);
        self
    }
}

impl MockDnsServer {
    /// Starts a server on an ephemeral localhost port.
    pub async fn start(zone: MockZone, truncate_udp: bool) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let zone = Arc::new(zone);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::answer(&zone, &buf[..len], truncate_udp) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((mut stream, _)) = result {
                            let zone = zone.clone();
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(response) = Self::answer(&zone, &query, false) {
                                    let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&response);
                                    let _ = stream.write_all(&framed).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn answer(zone: &MockZone, query: &[u8], truncate: bool) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
        response.set_recursion_desired(true);
        response.set_recursion_available(true);

        for question in request.queries() {
            response.add_query(question.clone());
            if truncate || zone.rcode.is_some() {
                continue;
            }
            let key = (question.name().to_utf8(), question.query_type());
            for data in zone.records.get(&key).into_iter().flatten() {
                response.add_answer(Record::from_rdata(question.name().clone(), 300, data.clone()));
            }
        }

        if let Some(rcode) = zone.rcode {
            response.set_response_code(rcode);
        }
        response.set_truncated(truncate);
        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn name(text: &str) -> Name {
    Name::from_str(text).unwrap()
}
