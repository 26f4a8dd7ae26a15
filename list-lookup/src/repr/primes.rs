
/// Ascending primes, each roughly 1.2 times the previous one.
const PRIMES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369,
];

/// Returns the smallest prime from the table that is `>= min`, or the smallest prime
/// `>= min` if `min` is beyond the table.
pub(crate) fn next_prime(min: usize) -> usize {
    let idx = PRIMES.partition_point(|&p| p < min);
    if let Some(&p) = PRIMES.get(idx) {
        return p;
    }
    let mut candidate = min | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
