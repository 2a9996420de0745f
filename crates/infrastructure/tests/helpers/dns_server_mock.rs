use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const TYPE_A: u16 = 1;
const TYPE_PTR: u16 = 12;
const TYPE_AAAA: u16 = 28;

#[derive(Debug, Clone)]
pub enum MockAnswer {
    Addr(IpAddr),
    Ptr(String),
}

impl MockAnswer {
    fn qtype(&self) -> u16 {
        match self {
            MockAnswer::Addr(IpAddr::V4(_)) => TYPE_A,
            MockAnswer::Addr(IpAddr::V6(_)) => TYPE_AAAA,
            MockAnswer::Ptr(_) => TYPE_PTR,
        }
    }
}

/// How the UDP side of the mock answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    Answer,
    /// Empty answer with the TC bit set; the full answer is served over TCP
    /// on the same port.
    Truncated,
    /// Full answer carrying an ID that does not match the query.
    WrongId,
}

type AnswerTable = HashMap<(String, u16), Vec<MockAnswer>>;

/// A nameserver on 127.0.0.1 answering from a fixed table.
///
/// Names missing from the table get an empty NOERROR answer.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    tcp_task: Option<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start(answers: Vec<(&str, MockAnswer)>) -> Result<Self, std::io::Error> {
        Self::start_with(MockBehavior::Answer, answers).await
    }

    pub async fn start_with(
        behavior: MockBehavior,
        answers: Vec<(&str, MockAnswer)>,
    ) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let mut table: AnswerTable = HashMap::new();
        for (name, answer) in answers {
            table
                .entry((name.to_ascii_lowercase(), answer.qtype()))
                .or_default()
                .push(answer);
        }

        let table = Arc::new(table);

        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_task = if behavior == MockBehavior::Truncated {
            let listener = TcpListener::bind(addr).await?;
            Some(tokio::spawn(Self::serve_tcp(
                listener,
                Arc::clone(&table),
                Arc::clone(&tcp_queries),
            )))
        } else {
            None
        };

        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);
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
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_udp_response(&buf[..len], &table, behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
            tcp_task,
        })
    }

    async fn serve_tcp(listener: TcpListener, table: Arc<AnswerTable>, counter: Arc<AtomicUsize>) {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut len_buf = [0u8; 2];
            if stream.read_exact(&mut len_buf).await.is_err() {
                continue;
            }
            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
            if stream.read_exact(&mut query).await.is_err() {
                continue;
            }
            counter.fetch_add(1, Ordering::SeqCst);

            if let Some(response) = Self::build_response(&query, &table) {
                let _ = stream
                    .write_all(&(response.len() as u16).to_be_bytes())
                    .await;
                let _ = stream.write_all(&response).await;
                let _ = stream.flush().await;
            }
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    fn build_udp_response(
        query: &[u8],
        table: &AnswerTable,
        behavior: MockBehavior,
    ) -> Option<Vec<u8>> {
        match behavior {
            MockBehavior::Answer => Self::build_response(query, table),
            MockBehavior::Truncated => {
                let (_, _, question_end) = parse_question(query)?;
                let mut response = Vec::with_capacity(question_end);
                response.extend_from_slice(&query[0..2]);
                response.extend_from_slice(&[0x83, 0x80]);
                response.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
                response.extend_from_slice(&query[12..question_end]);
                Some(response)
            }
            MockBehavior::WrongId => {
                let mut response = Self::build_response(query, table)?;
                response[0] ^= 0xff;
                response[1] ^= 0xff;
                Some(response)
            }
        }
    }

    fn build_response(query: &[u8], table: &AnswerTable) -> Option<Vec<u8>> {
        let (qname, qtype, question_end) = parse_question(query)?;
        let answers = table
            .get(&(qname.to_ascii_lowercase(), qtype))
            .cloned()
            .unwrap_or_default();

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]);
        response.extend_from_slice(&[0x81, 0x80]);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..question_end]);

        for answer in answers {
            response.extend_from_slice(&[0xc0, 0x0c]);
            response.extend_from_slice(&answer.qtype().to_be_bytes());
            response.extend_from_slice(&[0x00, 0x01]);
            response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);

            let rdata = match answer {
                MockAnswer::Addr(IpAddr::V4(v4)) => v4.octets().to_vec(),
                MockAnswer::Addr(IpAddr::V6(v6)) => v6.octets().to_vec(),
                MockAnswer::Ptr(name) => encode_name(&name),
            };
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(&rdata);
        }

        Some(response)
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
        if let Some(task) = self.tcp_task.take() {
            task.abort();
        }
    }
}

fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    if query.len() < 12 {
        return None;
    }

    let mut labels = Vec::new();
    let mut pos = 12;
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos += len;
    }

    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    Some((labels.join("."), qtype, pos + 4))
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question() {
        let query = vec![
            0xab, 0xcd, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 3, b'w',
            b'w', b'w', 4, b't', b'e', b's', b't', 0, 0x00, 0x1c, 0x00, 0x01,
        ];
        let (name, qtype, end) = parse_question(&query).unwrap();
        assert_eq!(name, "www.test");
        assert_eq!(qtype, TYPE_AAAA);
        assert_eq!(end, query.len());
    }

    #[test]
    fn test_encode_name() {
        assert_eq!(
            encode_name("a.bc."),
            vec![1, b'a', 2, b'b', b'c', 0]
        );
    }
}
