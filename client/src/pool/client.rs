//! The pool service client.
//!
//! [`PoolClient`] checks every precondition locally, then issues exactly one
//! transport call per operation, bounded by the configured timeout. It never
//! retries and keeps no state between calls.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::envelope::ResponseEnvelope;
use super::transport::{HttpTransport, PoolRequest, Transport};
use super::types::{FromChain, QueryScope, SubmittedRecord, TxState};
use crate::account::get_address_public_key;
use crate::config::{PoolConfig, CANCEL_PATH, SEQUENCES_PATH, SUBMITTED_PATH, SUBMIT_PATH};
use crate::crypto::SigningCapability;
use crate::error::{msg, PoolError};
use crate::transaction::{sign_batch, validate_tx_list, BatchSubmissionPayload, TransactionRecord};

/// Client for one pool service.
#[derive(Debug, Clone)]
pub struct PoolClient<T> {
    transport: T,
    config: PoolConfig,
}

impl PoolClient<HttpTransport> {
    /// HTTP client for `config.base_url`.
    pub fn http(config: PoolConfig) -> Result<Self, PoolError> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> PoolClient<T> {
    pub fn new(transport: T, config: PoolConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, request: PoolRequest) -> Result<Value, PoolError> {
        let path = request.path.clone();
        let envelope: ResponseEnvelope =
            tokio::time::timeout(self.config.request_timeout, self.transport.request(request))
                .await
                .map_err(|_| PoolError::Transport("request timed out".to_string()))??;

        if !envelope.is_success() {
            warn!(%path, code = %envelope.code, msg = %envelope.msg, "pool service rejected request");
        }
        envelope.into_data()
    }

    // -----------------------------------------------------------------------
    // Sequences
    // -----------------------------------------------------------------------

    /// Reserves `count` consecutive sequence numbers for the account.
    ///
    /// `from_chain` accepts a [`FromChain`], a `bool`, or a raw `i64` wire
    /// value; anything other than `0` or `1` fails before the request.
    pub async fn reserve_sequences<F>(
        &self,
        public_key: &str,
        signed_addr: &str,
        from_chain: F,
        count: u32,
    ) -> Result<Vec<u32>, PoolError>
    where
        F: TryInto<FromChain>,
        PoolError: From<F::Error>,
    {
        require(public_key, msg::PUBLIC_KEY_INVALID)?;
        require(signed_addr, msg::SIGNED_ADDR_INVALID)?;
        let from_chain: FromChain = from_chain.try_into()?;
        self.reserve(public_key, signed_addr, from_chain, count).await
    }

    async fn reserve(
        &self,
        public_key: &str,
        signed_addr: &str,
        from_chain: FromChain,
        count: u32,
    ) -> Result<Vec<u32>, PoolError> {
        if count == 0 {
            return Err(PoolError::invalid(msg::COUNT_INVALID));
        }

        debug!(public_key, count, from_chain = from_chain.as_wire(), "reserving sequences");
        let request = PoolRequest::get(format!("{}/{}", SEQUENCES_PATH, public_key))
            .query("signedAddr", signed_addr)
            .query("fromChain", from_chain.as_wire())
            .query("count", count);

        let data = self.call(request).await?;
        let seqs = parse_sequences(data)?;
        if seqs.len() != count as usize {
            return Err(PoolError::protocol(format!(
                "expected {} sequences, got {}",
                count,
                seqs.len()
            )));
        }

        info!(public_key, count, first = seqs[0], "sequences reserved");
        Ok(seqs)
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Submits a signed batch. Returns `true` once the service accepts it.
    pub async fn submit(
        &self,
        public_key: &str,
        payload: &BatchSubmissionPayload,
    ) -> Result<bool, PoolError> {
        require(public_key, msg::PUBLIC_KEY_INVALID)?;
        require(&payload.integrity_hash_signature, msg::DATA_HASH_SIGN_INVALID)?;
        require(&payload.serialized_batch, msg::DATA_JSON_STR_INVALID)?;

        let body = serde_json::to_value(payload)
            .map_err(|e| PoolError::invalid(format!("{}: {}", msg::DATA_JSON_STR_INVALID, e)))?;

        debug!(public_key, bytes = payload.serialized_batch.len(), "submitting batch");
        self.call(PoolRequest::post(format!("{}/{}", SUBMIT_PATH, public_key), body))
            .await?;

        info!(public_key, "batch accepted");
        Ok(true)
    }

    /// Lists the account's submitted transactions in `state`.
    pub async fn fetch_submitted(
        &self,
        public_key: &str,
        state: TxState,
        scope: &QueryScope,
    ) -> Result<Vec<SubmittedRecord>, PoolError> {
        require(public_key, msg::PUBLIC_KEY_INVALID)?;
        let count = scope.as_wire()?;

        debug!(public_key, state = state.as_wire(), count, "fetching submitted records");
        let request = PoolRequest::get(format!("{}/{}", SUBMITTED_PATH, public_key))
            .query("state", state.as_wire())
            .query("count", count);

        let data = self.call(request).await?;
        let records = match data {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value::<SubmittedRecord>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| PoolError::protocol(format!("malformed submitted record: {}", e)))?,
            other => {
                return Err(PoolError::protocol(format!(
                    "submitted records must be an array, got {}",
                    json_type(&other)
                )))
            }
        };

        info!(public_key, state = state.as_wire(), found = records.len(), "submitted records fetched");
        Ok(records)
    }

    /// Cancels every transaction of the account that is not yet on chain or
    /// that failed on chain. Safe to repeat.
    pub async fn cancel_unchained(
        &self,
        public_key: &str,
        signed_addr: &str,
    ) -> Result<bool, PoolError> {
        require(public_key, msg::PUBLIC_KEY_INVALID)?;
        require(signed_addr, msg::SIGNED_ADDR_INVALID)?;

        debug!(public_key, "cancelling unchained transactions");
        let request = PoolRequest::post(
            format!("{}/{}", CANCEL_PATH, public_key),
            json!({ "signedAddr": signed_addr }),
        );

        let canceled = match self.call(request).await? {
            Value::Bool(canceled) => canceled,
            Value::Null => true,
            other => {
                return Err(PoolError::protocol(format!(
                    "cancel result must be a boolean, got {}",
                    json_type(&other)
                )))
            }
        };

        info!(public_key, canceled, "cancel processed");
        Ok(canceled)
    }

    // -----------------------------------------------------------------------
    // Composite flows
    // -----------------------------------------------------------------------

    /// Derives the account, reserves one sequence per record, signs and
    /// submits. Returns the payload that was accepted.
    ///
    /// Records are validated before any sequence is reserved.
    pub async fn sign_and_submit<S, F>(
        &self,
        signer: &S,
        tx_list: &[TransactionRecord],
        secret: &str,
        from_chain: F,
    ) -> Result<BatchSubmissionPayload, PoolError>
    where
        S: SigningCapability + ?Sized,
        F: TryInto<FromChain>,
        PoolError: From<F::Error>,
    {
        validate_tx_list(signer, tx_list)?;
        let from_chain: FromChain = from_chain.try_into()?;
        let account = get_address_public_key(signer, secret)?;
        let count = u32::try_from(tx_list.len())
            .map_err(|_| PoolError::invalid(msg::TX_LIST_INVALID))?;

        let seqs = self
            .reserve(&account.public_key, &account.signed_address, from_chain, count)
            .await?;
        let payload = sign_batch(signer, tx_list, &seqs, secret)?;
        self.submit(&account.public_key, &payload).await?;
        Ok(payload)
    }

    /// `true` if the account has any record in [`TxState::Failed`].
    ///
    /// Queried around [`SETTLE_PROBE_DELAY`](crate::config::SETTLE_PROBE_DELAY)
    /// after a submission, `false` suggests everything landed. This is an
    /// operational signal only: with many accounts in flight a late failure
    /// can still appear afterwards.
    pub async fn has_failed_submissions(&self, public_key: &str) -> Result<bool, PoolError> {
        let failed = self
            .fetch_submitted(public_key, TxState::Failed, &QueryScope::All)
            .await?;
        Ok(!failed.is_empty())
    }
}

fn require(value: &str, message: &'static str) -> Result<(), PoolError> {
    if value.trim().is_empty() {
        Err(PoolError::invalid(message))
    } else {
        Ok(())
    }
}

fn parse_sequences(data: Value) -> Result<Vec<u32>, PoolError> {
    let items = match data {
        Value::Array(items) => items,
        other => {
            return Err(PoolError::protocol(format!(
                "sequences must be an array, got {}",
                json_type(&other)
            )))
        }
    };
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| PoolError::protocol(format!("invalid sequence number: {}", item)))
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
