//! Unchecked LZ4 block decompression ("fast" variant).
//!
//! Implements `LZ4_decompress_fast` / `LZ4_decompress_fast_continue` from
//! `lz4.c` v1.10.0 (the `LZ4_decompress_unsafe_generic` family).
//!
//! # Trust model
//!
//! Unlike [`decompress_safe`](super::decompress_api::decompress_safe), this
//! decoder performs **no validation** of the compressed stream: it does not
//! check that match offsets stay within the output window, it does not detect
//! truncated tokens, and it trusts the caller's `original_size` exactly. Fed
//! adversarial or corrupted input, it can read and write out of bounds. Use it
//! only when the compressed data comes from a source you trust completely —
//! e.g. your own previously-compressed blocks — never on untrusted or
//! externally-supplied data. [`decompress_safe`](super::decompress_api::decompress_safe)
//! is the correct choice whenever the input is not fully trusted.
//!
//! The upstream C implementation has carried the same warning on this
//! function for years and the reference header doc-comments this crate was
//! checked against describe `LZ4_decompress_fast_continue` identically under
//! two separate declarations — that duplication is intentional upstream, not
//! reproduced here as two functions.

use core::ptr;

use super::types::{DictDirective, ML_BITS, ML_MASK, RUN_MASK};

/// Errors returned by the unchecked fast-decompression path.
///
/// Unlike [`DecompressError`](super::decompress_core::DecompressError), this
/// only captures the handful of conditions that can be detected without
/// bounds-checking every step — a run past the promised `original_size`, or
/// an offset of zero. Anything else is undefined behaviour, by contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastDecompressError {
    /// Decoding reached `original_size` output bytes before the input was
    /// exhausted on a final sequence, or the input ended mid-token.
    Corrupted,
}

#[inline(always)]
fn fail<T>() -> Result<T, FastDecompressError> {
    Err(FastDecompressError::Corrupted)
}

/// Copies `end - dst` bytes one at a time. Correct regardless of overlap
/// between `src` and `dst`, unlike the wildcopy primitives.
///
/// # Safety
/// `dst` must be valid for writes and `src` valid for reads of `end - dst`
/// bytes.
#[inline(always)]
unsafe fn copy_bytewise(mut dst: *mut u8, mut src: *const u8, end: *mut u8) {
    while dst < end {
        *dst = *src;
        dst = dst.add(1);
        src = src.add(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_fast_generic
// ─────────────────────────────────────────────────────────────────────────────

/// Core unchecked decompression loop.
///
/// Decodes sequences until exactly `original_size` bytes have been written to
/// `dst`. Mirrors `LZ4_decompress_unsafe_generic`, generalised with a
/// [`DictDirective`] so the streaming wrapper can reuse it for prefix and
/// external-dictionary continuation.
///
/// Returns the number of bytes consumed from `src`.
///
/// # Safety
/// - `dst` must be valid for writes of exactly `original_size` bytes. The
///   match copy falls back to a byte-accurate loop whenever the wildcopy
///   primitives could overshoot `dst + original_size`, so no extra margin
///   past the logical end is required.
/// - `src` must be valid for reads of at least as many bytes as the
///   compressed stream actually consumes; the caller is trusted to have
///   supplied a genuine, complete LZ4 block — this function does not check.
/// - When `dict == DictDirective::WithPrefix64k`, the 64 KiB immediately
///   preceding `dst` must be readable and hold the previous block's output.
/// - When `dict == DictDirective::UsingExtDict`, `dict_start` must be valid
///   for `dict_size` reads and `dict_end = dict_start.add(dict_size)` must be
///   the externally-supplied dictionary's logical end.
#[allow(clippy::too_many_arguments)]
pub unsafe fn decompress_fast_generic(
    src: *const u8,
    dst: *mut u8,
    original_size: usize,
    dict: DictDirective,
    low_prefix: *const u8,
    dict_start: *const u8,
    dict_size: usize,
) -> Result<usize, FastDecompressError> {
    let mut ip: *const u8 = src;
    let mut op: *mut u8 = dst;
    let oend: *mut u8 = dst.add(original_size);
    let dict_end: *const u8 = if dict_start.is_null() {
        ptr::null()
    } else {
        dict_start.add(dict_size)
    };

    loop {
        // SAFETY: caller guarantees the stream is well-formed and `ip` stays
        // within its bounds; no check is performed here by design.
        let token: u8 = *ip;
        ip = ip.add(1);

        let mut lit_length: usize = (token >> ML_BITS as u8) as usize;
        if lit_length == RUN_MASK as usize {
            loop {
                let b = *ip;
                ip = ip.add(1);
                lit_length += b as usize;
                if b != 255 {
                    break;
                }
            }
        }

        // Copy literals. `ptr::copy` tolerates the in-place / overlapping
        // case; the non-overlapping case is the overwhelming common one.
        ptr::copy(ip, op, lit_length);
        ip = ip.add(lit_length);
        op = op.add(lit_length);

        if op as usize >= oend as usize {
            // Reached the promised output size; the final sequence carries
            // no match (LASTLITERALS rule), so we stop right after literals.
            break;
        }

        // Match offset.
        let offset = super::types::read_le16(ip) as usize;
        ip = ip.add(2);
        if offset == 0 {
            return fail();
        }
        let match_ptr: *const u8 = (op as *const u8).sub(offset);

        // Match length.
        let mut match_length = (token & ML_MASK as u8) as usize;
        if match_length == ML_MASK as usize {
            loop {
                let b = *ip;
                ip = ip.add(1);
                match_length += b as usize;
                if b != 255 {
                    break;
                }
            }
        }
        match_length += 4; // MINMATCH

        // External-dictionary split, mirroring the safe decoder's handling
        // but without any of its bounds checks.
        if dict == DictDirective::UsingExtDict && match_ptr < low_prefix {
            debug_assert!(!dict_end.is_null());
            let copy_size = low_prefix as usize - match_ptr as usize;
            if match_length <= copy_size {
                let dict_src = dict_end.sub(copy_size);
                ptr::copy(dict_src, op, match_length);
                op = op.add(match_length);
            } else {
                let rest_size = match_length - copy_size;
                ptr::copy_nonoverlapping(dict_end.sub(copy_size), op, copy_size);
                op = op.add(copy_size);
                let end_of_match = op.add(rest_size);
                copy_bytewise(op, low_prefix, end_of_match);
                op = end_of_match;
            }
            continue;
        }

        // Standard (within-window) match copy, offset-pattern aware. No
        // offset-validity check — trusted input.
        let cpy = op.add(match_length);
        // `memcpy_using_offset` writes in unconditional 8-byte chunks and can
        // overshoot `cpy` by up to MATCH_SAFEGUARD_DISTANCE bytes — fine
        // everywhere except the last match, where that would write past
        // `oend`. Guard `original_size` first so `oend.sub(..)` below never
        // underflows past the start of `dst` on a small buffer.
        let near_end = original_size < super::types::MATCH_SAFEGUARD_DISTANCE
            || cpy > oend.sub(super::types::MATCH_SAFEGUARD_DISTANCE);
        if near_end {
            copy_bytewise(op, match_ptr, cpy);
        } else {
            super::types::memcpy_using_offset(op, match_ptr, cpy, offset);
        }
        op = cpy;

        if op as usize >= oend as usize {
            break;
        }
    }

    Ok(ip as usize - src as usize)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress `src` into exactly `dst.len()` bytes, trusting the caller.
///
/// Equivalent to `LZ4_decompress_fast`. `dst.len()` must equal the exact
/// original (uncompressed) size of the block that produced `src` — unlike
/// [`decompress_safe`](super::decompress_api::decompress_safe), there is no
/// way to detect a mismatched size from the compressed stream alone.
///
/// Returns the number of bytes consumed from `src` on success.
///
/// # Safety
/// `src` must be a genuine, complete LZ4 block compressed from data of
/// exactly `dst.len()` bytes; this function performs no validation and will
/// read and write out of bounds on malformed input. Never call this on
/// untrusted input. `dst` needs no extra margin past `dst.len()` — the
/// match copy never writes past it (see `decompress_fast_generic`).
pub unsafe fn decompress_fast(src: &[u8], dst: &mut [u8]) -> Result<usize, FastDecompressError> {
    decompress_fast_generic(
        src.as_ptr(),
        dst.as_mut_ptr(),
        dst.len(),
        DictDirective::NoDict,
        dst.as_ptr(),
        ptr::null(),
        0,
    )
}

/// Decompress the next block in a streaming session, trusting the caller.
///
/// Equivalent to `LZ4_decompress_fast_continue`. Reuses the prefix/external-
/// dictionary bookkeeping of [`Lz4StreamDecode`](super::decompress_api::Lz4StreamDecode)
/// so callers can mix fast and safe streaming decode as needed, but performs
/// none of the safe decoder's bounds checks.
///
/// # Safety
/// Same trust contract as [`decompress_fast`], plus the streaming contracts
/// of `decompress_safe_continue`: previously-decoded output referenced by
/// `ctx` must still be readable at the same address, and `ctx` must not be
/// concurrently accessed.
pub unsafe fn decompress_fast_continue(
    ctx: &mut super::decompress_api::Lz4StreamDecode,
    src: *const u8,
    dst: *mut u8,
    original_size: usize,
) -> Result<usize, FastDecompressError> {
    let result: usize;

    if ctx.prefix_size == 0 {
        // First call — no prefix, no dictionary.
        debug_assert!(ctx.ext_dict_size == 0);
        result = decompress_fast_generic(
            src,
            dst,
            original_size,
            DictDirective::NoDict,
            dst as *const u8,
            ptr::null(),
            0,
        )?;
        ctx.prefix_size = original_size;
        ctx.prefix_end = dst.add(original_size) as *const u8;
    } else if std::ptr::eq(ctx.prefix_end, dst) {
        // Rolling the current segment: new block is contiguous with previous.
        let dict = if ctx.ext_dict_size == 0 {
            DictDirective::NoDict
        } else {
            DictDirective::UsingExtDict
        };
        result = decompress_fast_generic(
            src,
            dst,
            original_size,
            dict,
            dst.sub(ctx.prefix_size) as *const u8,
            ctx.external_dict,
            ctx.ext_dict_size,
        )?;
        ctx.prefix_size += original_size;
        ctx.prefix_end = ctx.prefix_end.add(original_size);
    } else {
        // Buffer wrapped or caller switched buffers: previous prefix becomes
        // the external dictionary for this block.
        ctx.ext_dict_size = ctx.prefix_size;
        ctx.external_dict = ctx.prefix_end.sub(ctx.ext_dict_size);
        result = decompress_fast_generic(
            src,
            dst,
            original_size,
            DictDirective::UsingExtDict,
            dst as *const u8,
            ctx.external_dict,
            ctx.ext_dict_size,
        )?;
        ctx.prefix_size = original_size;
        ctx.prefix_end = dst.add(original_size) as *const u8;
    }

    Ok(result)
}
