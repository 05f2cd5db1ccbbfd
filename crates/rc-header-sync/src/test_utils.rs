//! Fixtures for header sync tests: deterministic signer sets, signed headers
//! and messages, encoded params and an in-memory host invocation.

use crate::adapters::InMemoryKVStore;
use crate::application::params::{
    SyncBlockHeaderParam, SyncCrossChainMsgParam, SyncGenesisHeaderParam,
};
use crate::codec;
use crate::config::HeaderSyncConfig;
use crate::domain::{Address, BlockHeader, ChainId, CrossChainMsg, Hash, SignatureEntry};
use crate::ports::outbound::InvocationContext;
use shared_crypto::{Ed25519KeyPair, KeyPair, PublicKey, Secp256k1KeyPair};

/// `n` Ed25519 signers seeded from `seed`, `seed + 1`, ...
pub fn ed25519_signers(seed: u8, n: usize) -> Vec<KeyPair> {
    (0..n)
        .map(|i| {
            let s = seed.wrapping_add(i as u8);
            KeyPair::Ed25519(Ed25519KeyPair::from_seed([s; 32]))
        })
        .collect()
}

/// `n` secp256k1 signers seeded from `seed`, `seed + 1`, ... (seeds must be non-zero).
pub fn secp256k1_signers(seed: u8, n: usize) -> Vec<KeyPair> {
    (0..n)
        .map(|i| {
            let s = seed.wrapping_add(i as u8);
            KeyPair::Secp256k1(Secp256k1KeyPair::from_bytes([s; 32]).expect("non-zero seed"))
        })
        .collect()
}

pub fn public_keys(signers: &[KeyPair]) -> Vec<PublicKey> {
    signers.iter().map(KeyPair::public_key).collect()
}

/// One signature entry per signer over `digest`.
pub fn sign_digest(digest: &Hash, signers: &[KeyPair]) -> Vec<SignatureEntry> {
    signers
        .iter()
        .map(|pair| SignatureEntry::new(pair.public_key(), pair.sign(digest)))
        .collect()
}

/// Replace the header's signatures with fresh ones from `signers`.
pub fn sign_header(header: &mut BlockHeader, signers: &[KeyPair]) {
    header.signatures = sign_digest(&header.digest(), signers);
}

/// Unsigned genesis header introducing `peer_set`.
pub fn genesis_header(peer_set: &[PublicKey]) -> BlockHeader {
    BlockHeader::new(0, [0u8; 32], b"genesis".to_vec()).with_peer_set(peer_set.to_vec())
}

/// Child of `parent`, signed by `signers`.
pub fn next_header(parent: &BlockHeader, signers: &[KeyPair]) -> BlockHeader {
    let height = parent.height + 1;
    let mut header = BlockHeader::new(height, parent.digest(), height.to_le_bytes().to_vec());
    sign_header(&mut header, signers);
    header
}

/// Child of `parent` rotating to `next_set`, signed by `signers`.
pub fn rotation_header(
    parent: &BlockHeader,
    next_set: &[PublicKey],
    signers: &[KeyPair],
) -> BlockHeader {
    let mut header = next_header(parent, &[]).with_peer_set(next_set.to_vec());
    sign_header(&mut header, signers);
    header
}

/// Linked chain of `count` headers after `parent`, all signed by `signers`.
pub fn header_chain(parent: &BlockHeader, count: usize, signers: &[KeyPair]) -> Vec<BlockHeader> {
    let mut headers: Vec<BlockHeader> = Vec::with_capacity(count);
    for _ in 0..count {
        let header = next_header(headers.last().unwrap_or(parent), signers);
        headers.push(header);
    }
    headers
}

pub fn signed_msg(
    chain_id: ChainId,
    height: u64,
    content: &[u8],
    signers: &[KeyPair],
) -> CrossChainMsg {
    let mut msg = CrossChainMsg::new(chain_id, height, content.to_vec());
    msg.signatures = sign_digest(&msg.digest(), signers);
    msg
}

pub fn genesis_param(chain_id: ChainId, header: &BlockHeader) -> Vec<u8> {
    let param = SyncGenesisHeaderParam {
        chain_id,
        genesis_header: codec::encode(header).expect("header encodes"),
    };
    codec::encode(&param).expect("param encodes")
}

pub fn headers_param(chain_id: ChainId, headers: &[BlockHeader]) -> Vec<u8> {
    let param = SyncBlockHeaderParam {
        chain_id,
        headers: headers
            .iter()
            .map(|h| codec::encode(h).expect("header encodes"))
            .collect(),
    };
    codec::encode(&param).expect("param encodes")
}

pub fn msgs_param(chain_id: ChainId, msgs: &[CrossChainMsg]) -> Vec<u8> {
    let param = SyncCrossChainMsgParam {
        chain_id,
        cross_chain_msgs: msgs
            .iter()
            .map(|m| codec::encode(m).expect("msg encodes"))
            .collect(),
    };
    codec::encode(&param).expect("param encodes")
}

/// Testing config whose operator is derived from `bookkeepers`.
pub fn operator_config(bookkeepers: &[KeyPair]) -> HeaderSyncConfig {
    HeaderSyncConfig::for_testing().with_operator_bookkeepers(public_keys(bookkeepers))
}

/// Host invocation backed by an [`InMemoryKVStore`].
pub struct TestInvocation {
    input: Vec<u8>,
    witnesses: Vec<Address>,
    store: InMemoryKVStore,
}

impl TestInvocation {
    pub fn new(store: InMemoryKVStore, input: Vec<u8>) -> Self {
        Self {
            input,
            witnesses: Vec::new(),
            store,
        }
    }

    /// Mark the invocation as authorized by `address`.
    pub fn with_witness(mut self, address: Address) -> Self {
        self.witnesses.push(address);
        self
    }

    pub fn into_store(self) -> InMemoryKVStore {
        self.store
    }
}

impl InvocationContext for TestInvocation {
    type Store = InMemoryKVStore;

    fn input(&self) -> &[u8] {
        &self.input
    }

    fn check_witness(&self, address: &Address) -> bool {
        self.witnesses.contains(address)
    }

    fn store(&mut self) -> &mut InMemoryKVStore {
        &mut self.store
    }
}
