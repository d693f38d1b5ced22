use logpile_store::StoreHandle;

use crate::wal::WalWriter;

pub struct AppState {
    pub store: StoreHandle,
    pub wal: WalWriter,
}
