use rand::Rng;
use symtree_expr::Expr;

const SYMBOLS: &[&str] = &["a", "b", "c", "x", "y", "z", "Null", "True", "False"];

/// Small integers most of the time, occasionally a full-range one.
pub fn gen_integer(rng: &mut impl Rng) -> Expr {
    let n = if rng.gen_bool(0.9) {
        rng.gen_range(-1000..=1000)
    } else {
        rng.gen::<i64>()
    };
    Expr::int(n)
}

/// A finite real.
pub fn gen_real(rng: &mut impl Rng) -> Expr {
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    Expr::real(sign * rng.gen::<f64>() * 1e6)
}

/// Printable ASCII string of 1 to 12 characters.
pub fn gen_string(rng: &mut impl Rng) -> Expr {
    let len = rng.gen_range(1..=12);
    let s: String = (0..len)
        .map(|_| char::from(rng.gen_range(32u8..=126)))
        .collect();
    Expr::string(s)
}

pub fn gen_symbol(rng: &mut impl Rng) -> Expr {
    Expr::symbol(SYMBOLS[rng.gen_range(0..SYMBOLS.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn strings_are_printable() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..100 {
            let s = gen_string(&mut rng);
            let s = s.as_str().unwrap();
            assert!((1..=12).contains(&s.len()));
            assert!(s.bytes().all(|b| (32..=126).contains(&b)));
        }
    }

    #[test]
    fn reals_are_finite() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..100 {
            match gen_real(&mut rng).node() {
                symtree_expr::Node::Atom(symtree_expr::Atom::Real(r)) => assert!(r.is_finite()),
                other => panic!("expected a real, got {other:?}"),
            }
        }
    }

    #[test]
    fn symbols_come_from_the_pool() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..50 {
            let s = gen_symbol(&mut rng);
            assert!(SYMBOLS.contains(&s.as_symbol().unwrap().as_str()));
        }
    }
}
