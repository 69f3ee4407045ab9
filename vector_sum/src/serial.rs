use log::debug;

use crate::{Result, SumErr, alloc::BufferAlloc, generation::VecGen, sum::vector_sum_into};

/// Computes `z = x + y` on full-length vectors in a single worker.
///
/// # Arguments
/// * `order` - The length of the vectors.
/// * `vec_gen` - The input source, `x` is drawn first and `y` second.
/// * `alloc` - Where the three vectors come from.
///
/// # Returns
/// The sum vector, or an error if the vectors couldn't be allocated or generated.
pub fn serial_sum<G, A>(order: usize, vec_gen: &mut G, alloc: &A) -> Result<Vec<f64>>
where
    G: VecGen,
    A: BufferAlloc,
{
    let (Some(mut x), Some(mut y), Some(mut z)) =
        (alloc.alloc(order), alloc.alloc(order), alloc.alloc(order))
    else {
        return Err(SumErr::Allocation("Can't allocate vectors"));
    };

    if !vec_gen.fill(&mut x) || !vec_gen.fill(&mut y) {
        return Err(SumErr::Generation);
    }

    vector_sum_into(&x, &y, &mut z);
    debug!("summed {order} elements");

    Ok(z)
}
