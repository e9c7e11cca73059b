use assertest::{Suite, assert_tests, check};

#[assert_tests]
fn f() {
    assert!(true);
    assert!(false);
    assert!(3 == 3);
}

#[assert_tests]
fn keeps_going() {
    assert_eq!(1, 1);
    assert_eq!(1, 2);
    assert_eq!(2, 2);
    println!("still running after the failed check");
}

#[assert_tests(name = "fizzbuzz")]
fn fizzbuzz_checks() {
    let fizzbuzz = |n: u32| match (n % 3, n % 5) {
        (0, 0) => "FizzBuzz".to_string(),
        (0, _) => "Fizz".to_string(),
        (_, 0) => "Buzz".to_string(),
        _ => n.to_string(),
    };
    for n in 1..=15 {
        if n % 15 == 0 {
            assert_eq!(fizzbuzz(n), "FizzBuzz");
        } else if n % 3 == 0 {
            assert_eq!(fizzbuzz(n), "Fizz");
        }
    }
    assert_ne!(fizzbuzz(7), "Fizz");
}

fn main() {
    f();
    keeps_going();
    fizzbuzz_checks();

    let mut suite = Suite::new("closures");
    check!(suite, assert!("abc".starts_with('a')));
    check!(suite, assert_eq!("abc".len(), 4));
    suite.run();
}
