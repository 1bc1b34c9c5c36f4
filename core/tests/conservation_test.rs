// Property suite: conservation of supply under arbitrary operation
// sequences. Whatever mix of mints, burns, transfers, wipes and bridge
// operations runs -- and however many of them are rejected -- the sum of
// all balances must equal the total supply after every single call.

use proptest::prelude::*;

use stablecoin_core::{Address, EventLog, InitParams, StableCoin, WipeAuthority};

const ACCOUNTS: usize = 6;

fn addr(index: usize) -> Address {
    Address::new([(index + 1) as u8; 32])
}

// Fixed role assignment over the account universe
const OWNER: usize = 0;
const SUPPLY: usize = 1;
const COMPLIANCE: usize = 2;
const ENFORCEMENT: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Mint(u64),
    Burn(u64),
    Transfer { from: usize, to: usize, amount: u64 },
    Approve { owner: usize, spender: usize, amount: u64 },
    TransferFrom { spender: usize, owner: usize, to: usize, amount: u64 },
    SetKyc(usize),
    UnsetKyc(usize),
    Freeze(usize),
    Unfreeze(usize),
    Pause,
    Unpause,
    Wipe(usize),
    ApproveExternal { owner: usize, amount: u64 },
    ExternalTransfer { owner: usize, amount: u64 },
    ExternalTransferFrom { recipient: usize, amount: u64 },
}

fn account() -> impl Strategy<Value = usize> {
    0..ACCOUNTS
}

fn amount() -> impl Strategy<Value = u64> {
    0u64..=1_000
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount().prop_map(Op::Mint),
        amount().prop_map(Op::Burn),
        (account(), account(), amount())
            .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
        (account(), account(), amount())
            .prop_map(|(owner, spender, amount)| Op::Approve { owner, spender, amount }),
        (account(), account(), account(), amount()).prop_map(
            |(spender, owner, to, amount)| Op::TransferFrom { spender, owner, to, amount }
        ),
        account().prop_map(Op::SetKyc),
        account().prop_map(Op::UnsetKyc),
        account().prop_map(Op::Freeze),
        account().prop_map(Op::Unfreeze),
        Just(Op::Pause),
        Just(Op::Unpause),
        account().prop_map(Op::Wipe),
        (account(), amount()).prop_map(|(owner, amount)| Op::ApproveExternal { owner, amount }),
        (account(), amount()).prop_map(|(owner, amount)| Op::ExternalTransfer { owner, amount }),
        (account(), amount())
            .prop_map(|(recipient, amount)| Op::ExternalTransferFrom { recipient, amount }),
    ]
}

fn setup() -> StableCoin {
    StableCoin::initialized(
        addr(OWNER),
        InitParams {
            name: "Prop Dollar".to_string(),
            symbol: "PUSD".to_string(),
            decimals: 6,
            initial_supply: 10_000,
            supply_manager: addr(SUPPLY),
            compliance_manager: addr(COMPLIANCE),
            enforcement_manager: addr(ENFORCEMENT),
            wipe_authority: WipeAuthority::EnforcementManager,
        },
    )
    .unwrap()
}

/// Apply one operation with its rightful caller, ignoring rejections.
fn apply(coin: &mut StableCoin, log: &mut EventLog, op: &Op) {
    let network = "net".to_string();
    let destination = vec![0xEE; 8];
    let _ = match *op {
        Op::Mint(amount) => coin.mint(addr(SUPPLY), amount, log),
        Op::Burn(amount) => coin.burn(addr(SUPPLY), amount, log),
        Op::Transfer { from, to, amount } => coin.transfer(addr(from), addr(to), amount, log),
        Op::Approve { owner, spender, amount } => {
            coin.approve_allowance(addr(owner), addr(spender), amount, log)
        }
        Op::TransferFrom { spender, owner, to, amount } => {
            coin.transfer_from(addr(spender), addr(owner), addr(to), amount, log)
        }
        Op::SetKyc(account) => coin.set_kyc_passed(addr(COMPLIANCE), addr(account), log),
        Op::UnsetKyc(account) => coin.unset_kyc_passed(addr(COMPLIANCE), addr(account), log),
        Op::Freeze(account) => coin.freeze(addr(COMPLIANCE), addr(account), log),
        Op::Unfreeze(account) => coin.unfreeze(addr(COMPLIANCE), addr(account), log),
        Op::Pause => coin.pause(addr(COMPLIANCE), log),
        Op::Unpause => coin.unpause(addr(COMPLIANCE), log),
        Op::Wipe(account) => coin.wipe(addr(ENFORCEMENT), addr(account), log),
        Op::ApproveExternal { owner, amount } => {
            coin.approve_external_transfer(addr(owner), network, destination, amount, log)
        }
        Op::ExternalTransfer { owner, amount } => coin.external_transfer(
            addr(SUPPLY),
            addr(owner),
            network,
            destination,
            amount,
            log,
        ),
        Op::ExternalTransferFrom { recipient, amount } => coin.external_transfer_from(
            addr(SUPPLY),
            destination,
            network,
            addr(recipient),
            amount,
            log,
        ),
    };
}

fn sum_balances(coin: &StableCoin) -> u64 {
    coin.balances().map(|(_, amount)| amount).sum()
}

proptest! {
    #[test]
    fn conservation_holds_under_arbitrary_sequences(
        ops in proptest::collection::vec(op_strategy(), 1..80)
    ) {
        let mut coin = setup();
        let mut log = EventLog::new();

        prop_assert_eq!(sum_balances(&coin), coin.total_supply());

        for op in &ops {
            apply(&mut coin, &mut log, op);
            prop_assert_eq!(sum_balances(&coin), coin.total_supply());
        }
    }

    #[test]
    fn rejected_ops_never_mutate_state(
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        let mut coin = setup();
        let mut log = EventLog::new();

        // Freeze the whole universe out of the ledger: revoke KYC and pause,
        // then retry every value-moving op from a caller with no role.
        coin.pause(addr(COMPLIANCE), &mut log).unwrap();
        let snapshot = coin.clone();
        let intruder = Address::new([0xFF; 32]);

        for op in &ops {
            let result = match *op {
                Op::Mint(amount) => coin.mint(intruder, amount, &mut log),
                Op::Burn(amount) => coin.burn(intruder, amount, &mut log),
                Op::Transfer { to, amount, .. } => {
                    coin.transfer(intruder, addr(to), amount, &mut log)
                }
                Op::Wipe(account) => coin.wipe(intruder, addr(account), &mut log),
                _ => continue,
            };
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(&coin, &snapshot);
    }
}
