use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfigured {
    pub pool_id: u32,
    pub offering_amount: i128,
    pub raising_amount: i128,
    pub deposit_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositMade {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Harvested {
    pub pool_id: u32,
    pub user: Address,
    pub offering_payout: i128,
    pub refund_amount: i128,
    pub tax_amount: i128,
}

pub fn emit_pool_configured(
    env: &Env,
    pool_id: u32,
    offering_amount: i128,
    raising_amount: i128,
    deposit_token: Address,
) {
    let topics = (symbol_short!("pool_set"), pool_id);
    let data = PoolConfigured {
        pool_id,
        offering_amount,
        raising_amount,
        deposit_token,
    };
    env.events().publish(topics, data);
}

pub fn emit_deposit(env: &Env, pool_id: u32, user: Address, amount: i128) {
    let topics = (symbol_short!("deposit"), pool_id);
    let data = DepositMade {
        pool_id,
        user,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_harvest(
    env: &Env,
    pool_id: u32,
    user: Address,
    offering_payout: i128,
    refund_amount: i128,
    tax_amount: i128,
) {
    let topics = (symbol_short!("harvest"), pool_id);
    let data = Harvested {
        pool_id,
        user,
        offering_payout,
        refund_amount,
        tax_amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_offering_token_set(env: &Env, token: Address) {
    env.events().publish((symbol_short!("offer_set"),), token);
}

pub fn emit_sale_started(env: &Env, start_block: u32) {
    env.events().publish((symbol_short!("sale_go"),), start_block);
}

pub fn emit_sale_ended(env: &Env, end_block: u32) {
    env.events().publish((symbol_short!("sale_end"),), end_block);
}

pub fn emit_recovered(env: &Env, token: Address, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("recovered"),), (token, to, amount));
}
