use bson::{Document, bson, doc};
use jsonquery::Compiler;
use std::sync::Arc;
use std::thread;

#[test]
fn shared_compiler_across_threads() {
    let compiler = Arc::new(Compiler::with_fallback(|expr: &Document| -> jsonquery::Result<Document> {
        Ok(doc! {"custom": expr.get_str("field").unwrap_or_default()})
    }));

    let threads = 4;
    let per_thread = 50;
    let mut handles = Vec::new();
    for t in 0..threads {
        let compiler = Arc::clone(&compiler);
        handles.push(thread::spawn(move || {
            for i in 0..per_thread {
                let n = t * 1_000 + i;
                let out = compiler
                    .compile(&bson!({"operator": "AND", "expressions": [
                        {"operator": "GT", "field": "n", "value": n},
                        {"operator": "CUSTOM", "field": format!("f{n}")}
                    ]}))
                    .unwrap();
                assert_eq!(
                    out,
                    doc! {"$and": [{"n": {"$gt": n}}, {"custom": format!("f{n}")}]}
                );
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn compiler_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compiler>();
    assert_send_sync::<jsonquery::QueryBuilder>();
}
