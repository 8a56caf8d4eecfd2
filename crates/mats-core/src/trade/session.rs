use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::time::Duration;

use tracing::debug;

use super::{MaterialsTrader, TraderEvent};
use crate::world::GameClient;

/// Create the channel the network layer uses to deliver trader events.
pub fn event_channel() -> (Sender<TraderEvent>, Receiver<TraderEvent>) {
    channel()
}

/// Single-consumer event loop around a [`MaterialsTrader`].
///
/// Each frame, every event received so far is dispatched in arrival order,
/// then the trader is ticked once. Nothing here blocks.
pub struct TradeSession<C: GameClient> {
    trader: MaterialsTrader,
    client: C,
    events: Receiver<TraderEvent>,
    disconnected: bool,
}

impl<C: GameClient> TradeSession<C> {
    pub fn new(trader: MaterialsTrader, client: C, events: Receiver<TraderEvent>) -> Self {
        Self {
            trader,
            client,
            events,
            disconnected: false,
        }
    }

    pub fn trader(&self) -> &MaterialsTrader {
        &self.trader
    }

    pub fn trader_mut(&mut self) -> &mut MaterialsTrader {
        &mut self.trader
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// All event senders were dropped.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Run one frame. Returns the number of events dispatched.
    pub fn pump(&mut self, delta: Duration) -> usize {
        let mut dispatched = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.trader.handle_event(event, &mut self.client);
                    dispatched += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        debug!("Trader event channel disconnected");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }

        self.trader.tick(delta, &mut self.client);
        dispatched
    }

    pub fn into_parts(self) -> (MaterialsTrader, C) {
        (self.trader, self.client)
    }
}
