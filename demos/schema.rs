use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use stake_my_score::msg::{
    ConfigResponse, EscrowResponse, ExecuteMsg, InstantiateMsg, ParticipantResponse,
    ParticipantsResponse, PoolResponse, QueryMsg,
};
use stake_my_score::state::{Config, Participant, Pool};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);
    export_schema(&schema_for!(Pool), &out_dir);
    export_schema(&schema_for!(Participant), &out_dir);
    export_schema(&schema_for!(ConfigResponse), &out_dir);
    export_schema(&schema_for!(PoolResponse), &out_dir);
    export_schema(&schema_for!(ParticipantResponse), &out_dir);
    export_schema(&schema_for!(ParticipantsResponse), &out_dir);
    export_schema(&schema_for!(EscrowResponse), &out_dir);
}
