use data_sweeper::ingestion::load;
use data_sweeper::types::{Table, TableFormat, Value};

/// Small CSV-derived tables covering every column type, nulls, duplicates and a header-only file.
pub fn sample_tables() -> Vec<Table> {
    let inputs: [&[u8]; 6] = [
        b"id,name\n1,a\n1,a\n2,b\n",
        b"order_id,customer,amount,quantity\n1,Ada,10.5,2\n2,Grace,,1\n1,Ada,10.5,2\n3,Linus,20,\n4,,15.5,3\n",
        b"x,y\n,\n,\n1,\n",
        b"flag,score\ntrue,0.0\ntrue,-0.0\nfalse,\n",
        b"n,note\n10,NA\nN/A,\"a,b\"\n20,\"two\nlines\"\n",
        b"a\n",
    ];
    inputs
        .iter()
        .map(|bytes| load(bytes, TableFormat::Csv).unwrap())
        .collect()
}

/// Cell equality where numbers compare by value, so `Int64(1)` matches `Float64(1.0)`.
#[allow(dead_code)]
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
