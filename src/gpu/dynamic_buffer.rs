//! Vertex buffers that grow when the data outgrows them.
//!
//! GPU buffers cannot be resized in place, so a write larger than the
//! current capacity allocates a new buffer with room to spare. Buffers
//! never shrink.

use std::marker::PhantomData;

/// Smallest allocation in bytes.
const MIN_CAPACITY: usize = 64;
/// Minimum growth step in bytes.
const MIN_GROWTH: usize = 1024;

/// New byte capacity for a write of `needed` bytes, or `None` if `current`
/// already fits it. Grows 2x, by at least [`MIN_GROWTH`].
fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| (needed * 2).max(current + MIN_GROWTH))
}

/// A typed GPU buffer that reallocates on overflow.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (size_of::<T>() * capacity).max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, bytes, usage),
            capacity: bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Upload `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let reallocated = match grown_capacity(self.capacity, bytes.len()) {
            Some(capacity) => {
                log::debug!("Growing {} to {capacity} bytes", self.label);
                self.buffer = allocate(device, &self.label, capacity, self.usage);
                self.capacity = capacity;
                true
            }
            None => false,
        };
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last [`write`](Self::write).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    size: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_without_growth() {
        assert_eq!(grown_capacity(1024, 1024), None);
        assert_eq!(grown_capacity(1024, 0), None);
    }

    #[test]
    fn grows_at_least_double_the_need() {
        assert_eq!(grown_capacity(64, 4096), Some(8192));
        // Small overflows still grow by the minimum step.
        assert_eq!(grown_capacity(4096, 4100), Some(8200));
        assert_eq!(grown_capacity(64, 100), Some(64 + MIN_GROWTH));
    }
}
