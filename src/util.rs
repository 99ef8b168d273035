/// Uniform random float in [a, b).
pub fn rand_range(rng: &mut fastrand::Rng, a: f32, b: f32) -> f32 {
    a + rng.f32() * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = rand_range(&mut rng, -3.0, 5.0);
            assert!((-3.0..5.0).contains(&v));
        }
    }
}
