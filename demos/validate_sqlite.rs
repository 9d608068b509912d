//! Validate a small discovery log against an in-memory database
//!
//! This example builds a toy TPC-H customer/orders schema, parses a log
//! with one candidate of each kind and prints the verdicts.

use rusqlite::Connection;
use depval::{parse_str, SqliteCursor};

const LOG: &str = "\
[plugin] Generating candidates
Checking UCC customer.c_custkey
Checking OD customer.c_custkey |-> customer.c_nationkey
Checking IND orders.o_custkey in customer.c_custkey
Checking FD customer.c_name, customer.c_custkey
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE customer (c_custkey INTEGER, c_name TEXT, c_nationkey INTEGER);
         CREATE TABLE orders (o_orderkey INTEGER, o_custkey INTEGER);
         INSERT INTO customer VALUES (1, 'Customer#1', 3), (2, 'Customer#2', 3), (3, 'Customer#2', 9);
         INSERT INTO orders VALUES (1, 1), (2, 1), (3, 3);",
    )?;

    let mut cursor = SqliteCursor::new(&conn);

    for candidate in parse_str(LOG)? {
        let valid = candidate.validate(&mut cursor)?;
        println!("{:<60} {}", candidate.label(), if valid { "valid" } else { "invalid" });
    }

    Ok(())
}
