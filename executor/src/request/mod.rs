//! Request-side components: fee collection and the NTT manager
//! composition that feeds it.

mod executor;
mod ntt_manager;
mod token_payment_executor;

pub use executor::{Executor, RequestForExecutionArgs, EXECUTOR_VERSION};
pub use ntt_manager::{
    NttManagerPeer, NttManagerWithExecutor, NttManagerWithTokenPaymentExecutor,
    NttTransferSelectors, NTT_MANAGER_WITH_EXECUTOR_VERSION,
    NTT_MANAGER_WITH_TOKEN_PAYMENT_EXECUTOR_VERSION, RETURN_PREFIX,
};
pub use token_payment_executor::{TokenPaymentExecutor, TOKEN_PAYMENT_EXECUTOR_VERSION};
