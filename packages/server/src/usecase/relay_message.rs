//! UseCase: broadcasting one inbound message
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 変換（検証・正規化）と送信者以外へのファンアウト
//!
//! ### なぜこのテストが必要か
//! - 遅いピア・切断済みピアが他のピアへの配信を妨げないことを保証
//! - 不正なメッセージがどのピアにも転送されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者以外の全員に配信
//! - エッジケース：送信者のみ接続、送信者へのエコー有効
//! - 異常系：不正なメッセージ、キューが満杯のピア、切断済みのピア

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{
    ConnectionId, ConnectionRegistry, DeliveryPolicy, Frame, MessageTransform, for_each_peer,
};

use super::error::RelayError;

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanOut {
    /// Peers whose queue accepted the message
    pub delivered: usize,
    /// Peers whose queue was full; the message was dropped for them only
    pub lagging: Vec<ConnectionId>,
    /// Peers whose writer is gone; they were unregistered
    pub gone: Vec<ConnectionId>,
}

/// Message relay usecase
pub struct RelayMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    transform: Arc<dyn MessageTransform>,
    policy: DeliveryPolicy,
}

impl RelayMessageUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        transform: Arc<dyn MessageTransform>,
        policy: DeliveryPolicy,
    ) -> Self {
        Self {
            registry,
            transform,
            policy,
        }
    }

    /// Transform `frame` and enqueue it for every targeted peer.
    ///
    /// Peers are taken from a registry snapshot. Enqueueing never waits: a
    /// full queue drops the message for that peer, a closed queue evicts the
    /// peer. One peer's failure never affects the others.
    ///
    /// # Returns
    ///
    /// * `Ok(FanOut)` - per-peer delivery outcome
    /// * `Err(RelayError::Rejected)` - the transform rejected the message; nothing was sent
    pub async fn execute(&self, from: &ConnectionId, frame: Frame) -> Result<FanOut, RelayError> {
        let frame = Arc::new(self.transform.apply(frame)?);

        let mut fan_out = FanOut::default();
        for_each_peer(self.registry.as_ref(), |peer| {
            let peer_id = peer.connection.id;
            if !self.policy.targets(from, &peer_id) {
                return;
            }

            match peer.outbound.try_send(frame.clone()) {
                Ok(()) => fan_out.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound queue full for '{}' ({}), dropping message",
                        peer_id,
                        peer.connection.remote_addr
                    );
                    fan_out.lagging.push(peer_id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!("Write to '{}' failed: connection is gone", peer_id);
                    fan_out.gone.push(peer_id);
                }
            }
        })
        .await;

        for peer_id in &fan_out.gone {
            self.registry.unregister(peer_id).await;
        }

        Ok(fan_out)
    }

    pub fn transform_name(&self) -> &'static str {
        self.transform.name()
    }
}
