/// `[P_0(x), P_1(x), ..., P_max_degree(x)]` in a single recurrence pass.
pub fn legendre_table(max_degree: usize, x: f64) -> Vec<f64> {
    let mut table = Vec::with_capacity(max_degree + 1);
    table.push(1.0);
    if max_degree == 0 {
        return table;
    }

    table.push(x);
    for l in 2..=max_degree {
        let p_l =
            (((2 * l - 1) as f64) * x * table[l - 1] - ((l - 1) as f64) * table[l - 2]) / (l as f64);
        table.push(p_l);
    }

    table
}
