//! Shared mock chain host and group builders for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use executor::chain::{
    Address, AppCallTxn, AssetTransferTxn, CapturedFailure, ChainHost, GroupTxn, OnCompletion,
    PaymentTxn,
};
use executor::{Event, ExecutorError};
use executor_messages::bytes::encode_length_prefixed;
use executor_messages::quote::{
    encode_signed_quote, CustomTokenQuoteBody, NativeQuoteBody, SignedQuoteHeader,
    CUSTOM_TOKEN_FEE_PREFIX, NATIVE_TOKEN_FEE_PREFIX,
};

pub const OUR_CHAIN: u16 = 8;
pub const DST_CHAIN: u16 = 22;
pub const NOW: u64 = 1_700_000_000;

/// Records every effect so tests can assert exactly what a call did
/// (and, on the error path, that it did nothing).
pub struct MockHost {
    pub now: u64,
    pub app_addresses: HashMap<u64, Address>,
    pub payments: Vec<(Address, u64)>,
    pub asset_transfers: Vec<(u64, Address, u64)>,
    pub events: Vec<Event>,
    pub invoke_results: VecDeque<Result<Vec<u8>, CapturedFailure>>,
    pub invocations: Vec<(Address, Vec<u8>, u64)>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            now: NOW,
            app_addresses: HashMap::new(),
            payments: Vec::new(),
            asset_transfers: Vec::new(),
            events: Vec::new(),
            invoke_results: VecDeque::new(),
            invocations: Vec::new(),
        }
    }

    pub fn with_app(mut self, app_id: u64, address: Address) -> Self {
        self.app_addresses.insert(app_id, address);
        self
    }

    pub fn with_invoke_result(mut self, result: Result<Vec<u8>, CapturedFailure>) -> Self {
        self.invoke_results.push_back(result);
        self
    }

    pub fn assert_no_effects(&self) {
        assert!(self.payments.is_empty(), "unexpected payments: {:?}", self.payments);
        assert!(
            self.asset_transfers.is_empty(),
            "unexpected asset transfers: {:?}",
            self.asset_transfers
        );
        assert!(self.events.is_empty(), "unexpected events: {:?}", self.events);
    }
}

impl ChainHost for MockHost {
    fn now(&self) -> u64 {
        self.now
    }

    fn app_address(&self, app_id: u64) -> Option<Address> {
        self.app_addresses.get(&app_id).copied()
    }

    fn submit_payment(&mut self, receiver: Address, amount: u64) -> Result<(), ExecutorError> {
        self.payments.push((receiver, amount));
        Ok(())
    }

    fn submit_asset_transfer(
        &mut self,
        asset_id: u64,
        receiver: Address,
        amount: u64,
    ) -> Result<(), ExecutorError> {
        self.asset_transfers.push((asset_id, receiver, amount));
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    fn invoke(
        &mut self,
        target: Address,
        payload: &[u8],
        gas_budget: u64,
    ) -> Result<Vec<u8>, CapturedFailure> {
        self.invocations.push((target, payload.to_vec(), gas_budget));
        self.invoke_results.pop_front().unwrap_or(Ok(Vec::new()))
    }
}

pub fn addr(tag: u8) -> Address {
    [tag; 32]
}

pub fn quoter_address() -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&hex::decode("dac17f958d2ee523a2206206994597c13d831bc7").unwrap());
    out
}

pub fn pay(sender: Address, receiver: Address, amount: u64) -> GroupTxn {
    GroupTxn::Payment(PaymentTxn { sender, receiver, amount })
}

pub fn axfer(sender: Address, receiver: Address, asset_id: u64, amount: u64) -> GroupTxn {
    GroupTxn::AssetTransfer(AssetTransferTxn {
        sender,
        asset_receiver: receiver,
        xfer_asset: asset_id,
        asset_amount: amount,
    })
}

pub fn appl(app_id: u64, selector: [u8; 4]) -> GroupTxn {
    GroupTxn::AppCall(AppCallTxn {
        app_id,
        on_completion: OnCompletion::NoOp,
        args: vec![selector.to_vec()],
        last_log: Vec::new(),
    })
}

/// A full native-fee quote, wire encoded.
pub fn native_quote(src_chain: u16, dst_chain: u16, expiry_time: u64, payee: Address) -> Vec<u8> {
    let header = SignedQuoteHeader {
        prefix: *NATIVE_TOKEN_FEE_PREFIX,
        quoter_address: quoter_address(),
        payee_address: payee,
        src_chain,
        dst_chain,
        expiry_time,
    };
    let body = NativeQuoteBody {
        base_fee: 8_000_000_000,
        dst_gas_price: 3_000_000_000,
        src_price: 8_000_000_000_000_000_000,
        dst_price: 6_000_000_000_000_000_000,
        signature: [0x05; 65],
    };
    encode_signed_quote(&header.encode(), &body.encode())
}

/// A full custom-token quote, wire encoded.
pub fn custom_token_quote(
    src_chain: u16,
    dst_chain: u16,
    expiry_time: u64,
    payee: Address,
    token_address: [u8; 32],
) -> Vec<u8> {
    let header = SignedQuoteHeader {
        prefix: *CUSTOM_TOKEN_FEE_PREFIX,
        quoter_address: quoter_address(),
        payee_address: payee,
        src_chain,
        dst_chain,
        expiry_time,
    };
    let body = CustomTokenQuoteBody {
        base_fee: 8_000_000_000,
        dst_gas_price: 3_000_000_000,
        src_price: 8_000_000_000_000_000_000,
        dst_price: 6_000_000_000_000_000_000,
        token_address,
        signature: [0x05; 65],
    };
    encode_signed_quote(&header.encode(), &body.encode())
}

/// Wraps a value in its 2-byte wire length prefix.
pub fn framed(data: &[u8]) -> Vec<u8> {
    encode_length_prefixed(data)
}
