extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    token, symbol_short, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{DepositMade, Harvested, PoolConfigured};
use crate::{InitialTokenOffering, InitialTokenOfferingClient};

fn setup() -> (Env, InitialTokenOfferingClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(InitialTokenOffering, ());
    let client = InitialTokenOfferingClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.init(&owner, &4u32, &10u32, &100u32, &None);
    (env, client, owner)
}

fn create_token<'a>(env: &Env) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let admin = Address::generate(env);
    let sac = env.register_stellar_asset_contract_v2(admin);
    (
        token::Client::new(env, &sac.address()),
        token::StellarAssetClient::new(env, &sac.address()),
    )
}

#[test]
fn test_pool_configured_event() {
    let (env, client, owner) = setup();
    let (deposit, _) = create_token(&env);

    client.set_pool(
        &owner, &1000i128, &10_000i128, &0i128, &2u32, &deposit.address, &false, &false, &false,
        &false,
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("pool_set").into_val(&env),
        2u32.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PoolConfigured = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PoolConfigured {
            pool_id: 2,
            offering_amount: 1000,
            raising_amount: 10_000,
            deposit_token: deposit.address.clone(),
        }
    );
}

#[test]
fn test_deposit_event() {
    let (env, client, owner) = setup();
    let (deposit, deposit_sac) = create_token(&env);
    let user = Address::generate(&env);
    deposit_sac.mint(&user, &1_000);
    client.set_pool(
        &owner, &1000i128, &10_000i128, &0i128, &0u32, &deposit.address, &false, &false, &false,
        &false,
    );

    env.ledger().with_mut(|li| li.sequence_number = 10);
    client.deposit_pool(&user, &250i128, &0u32);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("deposit").into_val(&env),
        0u32.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DepositMade = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        DepositMade {
            pool_id: 0,
            user: user.clone(),
            amount: 250,
        }
    );
}

#[test]
fn test_harvest_event_carries_settlement() {
    let (env, client, owner) = setup();
    let (deposit, deposit_sac) = create_token(&env);
    let user = Address::generate(&env);
    deposit_sac.mint(&user, &1_000);
    client.set_pool(
        &owner, &1000i128, &200i128, &0i128, &0u32, &deposit.address, &false, &false, &true,
        &true,
    );
    let (offering, offering_sac) = create_token(&env);
    offering_sac.mint(&client.address, &1000);
    client.set_offering_token(&owner, &offering.address);
    client.set_overflow_tax(&owner, &1000u32);

    env.ledger().with_mut(|li| li.sequence_number = 10);
    client.deposit_pool(&user, &300i128, &0u32);
    env.ledger().with_mut(|li| li.sequence_number = 100);
    client.harvest_pool(&user, &0u32);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("harvest").into_val(&env),
        0u32.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Sole depositor, oversubscribed: full offering, 100-unit gross refund
    // taxed at 10%.
    let event_data: Harvested = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Harvested {
            pool_id: 0,
            user: user.clone(),
            offering_payout: 1000,
            refund_amount: 90,
            tax_amount: 10,
        }
    );
}
