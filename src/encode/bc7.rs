use super::common::{color_error, fit_line, partial_sort_by_error, to_color, Palette};
use crate::{
    bits::BitCursor,
    decode::decode_block,
    interpolate::{quantize_color, unquantize, unquantize_color},
    mode::{ModeInfo, MODES},
    partition::{anchor, is_anchor, region, region_mask, MAX_REGIONS, MAX_SHAPES},
    BC7Settings, Block,
};

/// Endpoint pair of one region.
type Endpoints = [[u8; 4]; 2];

/// Candidate layout of a block.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    mode: usize,
    shape: usize,
    rotation: usize,
    index_mode: usize,
}

impl Candidate {
    #[inline]
    fn info(&self) -> &'static ModeInfo {
        &MODES[self.mode]
    }

    /// Color and alpha index precision. Alpha precision is 0 if alpha shares the color index.
    #[inline]
    fn index_precisions(&self) -> (u8, u8) {
        let info = self.info();
        if info.index_prec2 == 0 {
            (info.index_prec, 0)
        } else {
            info.index_precisions(self.index_mode)
        }
    }

    /// Palette of a quantized endpoint pair.
    fn palette(&self, pair: &Endpoints) -> Palette {
        let info = self.info();
        let (color_prec, alpha_prec) = self.index_precisions();
        Palette::new(
            unquantize_color(pair[0], info.color_prec_with_p),
            unquantize_color(pair[1], info.color_prec_with_p),
            color_prec,
            alpha_prec,
        )
    }
}

/// Index planes of a block and the error of each region.
#[derive(Debug, Clone, Copy)]
struct Indices {
    color: [usize; 16],
    alpha: [usize; 16],
    region_err: [f32; MAX_REGIONS],
}

impl Indices {
    #[inline]
    fn total(&self) -> f32 {
        self.region_err.iter().sum()
    }
}

pub(crate) struct BlockCompressorBC7<'a> {
    block: [f32; 64],
    pixels: [[u8; 4]; 16],
    opaque: bool,
    best_err: f32,
    best_mode: usize,
    best_block: Block,
    settings: &'a BC7Settings,
}

impl<'a> BlockCompressorBC7<'a> {
    pub(crate) fn new(settings: &'a BC7Settings) -> Self {
        Self {
            block: [0.0; 64],
            pixels: [[0; 4]; 16],
            opaque: true,
            best_err: f32::INFINITY,
            best_mode: 0,
            best_block: [0; 16],
            settings,
        }
    }

    /// Loads 16 pixels. The optional float pixels in 0.0..=1.0 drive the line fits.
    pub(crate) fn load_pixels(
        &mut self,
        pixels: &[[u8; 4]; 16],
        float_pixels: Option<&[[f32; 4]; 16]>,
    ) {
        self.pixels = *pixels;
        self.opaque = pixels.iter().all(|pixel| pixel[3] == 255);

        for k in 0..16 {
            for p in 0..4 {
                self.block[k + p * 16] = match float_pixels {
                    Some(float_pixels) => (float_pixels[k][p] * 255.0).clamp(0.0, 255.0),
                    None => f32::from(pixels[k][p]),
                };
            }
        }
    }

    pub(crate) fn load_block_interleaved_rgba(
        &mut self,
        rgba_data: &[u8],
        xx: usize,
        yy: usize,
        stride: usize,
    ) {
        let mut pixels = [[0; 4]; 16];
        for y in 0..4 {
            let offset = (yy * 4 + y) * stride + xx * 16;
            let row: &[[u8; 4]] = bytemuck::cast_slice(&rgba_data[offset..offset + 16]);
            pixels[y * 4..y * 4 + 4].copy_from_slice(row);
        }
        self.load_pixels(&pixels, None);
    }

    #[inline]
    pub(crate) fn encoded_block(&self) -> Block {
        self.best_block
    }

    #[cfg(test)]
    pub(crate) fn best_error(&self) -> f32 {
        self.best_err
    }

    fn mode_enabled(&self, mode: usize) -> bool {
        if self.settings.is_quick() {
            return mode == 6;
        }
        if !self.settings.uses_3_subsets() && MODES[mode].partitions == 2 {
            return false;
        }
        !(self.opaque && mode == 7)
    }

    /// Swaps alpha with the channel selected by `rotation`. Applying it twice restores the pixels.
    fn rotate(&mut self, rotation: usize) {
        let channel = match rotation {
            1 => 0,
            2 => 1,
            3 => 2,
            _ => return,
        };

        for pixel in self.pixels.iter_mut() {
            pixel.swap(channel, 3);
        }
        for k in 0..16 {
            self.block.swap(k + channel * 16, k + 48);
        }
    }

    pub(crate) fn compress_block_bc7_core(&mut self) {
        'modes: for mode in 0..MODES.len() {
            if !self.mode_enabled(mode) {
                continue;
            }

            let info = &MODES[mode];
            let rotations = if self.opaque { 1 } else { 1 << info.rotation_bits };
            let index_modes = 1 << info.index_mode_bits;

            for rotation in 0..rotations {
                self.rotate(rotation);
                for index_mode in 0..index_modes {
                    self.search_shapes(mode, rotation, index_mode);
                    if self.best_err == 0.0 {
                        break;
                    }
                }
                self.rotate(rotation);

                if self.best_err == 0.0 {
                    break 'modes;
                }
            }
        }

        if self.settings.validates() {
            self.validate();
        }
    }

    fn search_shapes(&mut self, mode: usize, rotation: usize, index_mode: usize) {
        let shape_count = MODES[mode].shape_count();

        let mut rough_err = [(f32::INFINITY, 0); MAX_SHAPES];
        let mut rough_endpoints = [[[[0; 4]; 2]; MAX_REGIONS]; MAX_SHAPES];
        for shape in 0..shape_count {
            let candidate = Candidate {
                mode,
                shape,
                rotation,
                index_mode,
            };
            let (err, endpoints) = self.rough_mse(&candidate);
            rough_err[shape] = (err, shape);
            rough_endpoints[shape] = endpoints;
        }

        let refined = self.settings.refined_shapes(shape_count);
        partial_sort_by_error(&mut rough_err[..shape_count], refined);

        for &(_, shape) in &rough_err[..refined] {
            let candidate = Candidate {
                mode,
                shape,
                rotation,
                index_mode,
            };

            let (err, block) = self.refine(&candidate, &rough_endpoints[shape]);
            if err < self.best_err {
                self.best_err = err;
                self.best_mode = mode;
                self.best_block = block;
            }

            if self.best_err == 0.0 {
                break;
            }
        }
    }

    /// Unquantized endpoints of a line fit through the pixels of `region_id`.
    fn rough_endpoints(&self, candidate: &Candidate, region_id: usize) -> Endpoints {
        let info = candidate.info();
        let mask = region_mask(info.partitions, candidate.shape, region_id);
        let separate_alpha = info.index_prec2 > 0;
        let channels = if info.has_alpha() && !separate_alpha {
            4
        } else {
            3
        };

        let mut pair = match mask.count_ones() {
            1 | 2 => {
                let first = mask.trailing_zeros() as usize;
                let last = 31 - mask.leading_zeros() as usize;
                [self.pixels[first], self.pixels[last]]
            }
            _ => fit_line(&self.block, mask, channels).map(to_color),
        };

        if separate_alpha {
            let alpha = (0..16)
                .filter(|k| mask & (1 << k) != 0)
                .map(|k| self.pixels[k][3]);
            pair[0][3] = alpha.clone().min().unwrap_or(255);
            pair[1][3] = alpha.max().unwrap_or(255);
        } else if !info.has_alpha() {
            pair[0][3] = 255;
            pair[1][3] = 255;
        }

        pair
    }

    /// Error of the rough endpoints of every region after quantization.
    fn rough_mse(&self, candidate: &Candidate) -> (f32, [Endpoints; MAX_REGIONS]) {
        let info = candidate.info();

        let mut endpoints = [[[0; 4]; 2]; MAX_REGIONS];
        let mut palettes = [None; MAX_REGIONS];
        for r in 0..info.region_count() {
            endpoints[r] = self.rough_endpoints(candidate, r);
            let quantized = endpoints[r].map(|ep| quantize_color(ep, info.color_prec_with_p));
            palettes[r] = Some(candidate.palette(&quantized));
        }

        let mut err = 0.0;
        for (pixel, color) in self.pixels.iter().enumerate() {
            if let Some(palette) = &palettes[region(info.partitions, candidate.shape, pixel)] {
                err += palette.nearest(*color).0;
            }
        }

        (err, endpoints)
    }

    /// Returns true if alpha has to reconstruct to 255 from both parity bits.
    #[inline]
    fn keeps_opaque_p_bits(&self, candidate: &Candidate) -> bool {
        self.opaque && candidate.mode == 6
    }

    fn refine(&self, candidate: &Candidate, rough: &[Endpoints; MAX_REGIONS]) -> (f32, Block) {
        let info = candidate.info();
        let regions = info.region_count();

        let mut org = [[[0; 4]; 2]; MAX_REGIONS];
        if self.keeps_opaque_p_bits(candidate) {
            org[0] = rough[0].map(|ep| quantize_with_p_bit(info, [ep[0], ep[1], ep[2], 255], 1));
        } else {
            for r in 0..regions {
                org[r] = rough[r].map(|ep| quantize_color(ep, info.color_prec_with_p));
            }
            fix_p_bits(info, &mut org);
        }
        let org_indices = self.assign_indices(candidate, &mut org);

        let mut opt = org;
        for r in 0..regions {
            opt[r] = self.optimize_endpoints(
                candidate,
                r,
                org_indices.region_err[r],
                &org[r],
                &rough[r],
            );
        }
        fix_p_bits(info, &mut opt);
        let opt_indices = self.assign_indices(candidate, &mut opt);

        let (endpoints, indices) = if opt_indices.total() < org_indices.total() {
            (opt, opt_indices)
        } else {
            (org, org_indices)
        };

        if self.settings.validates() && !anchors_are_canonical(candidate, &indices) {
            log::warn!(
                "BC7 mode {} shape {} has an anchor index with its top bit set",
                candidate.mode,
                candidate.shape
            );
        }

        (indices.total(), emit_block(candidate, &endpoints, &indices))
    }

    /// Maps every pixel to its nearest palette entry.
    ///
    /// Anchor indices get a clear top bit by swapping the endpoints of their region and
    /// inverting its indices.
    fn assign_indices(
        &self,
        candidate: &Candidate,
        endpoints: &mut [Endpoints; MAX_REGIONS],
    ) -> Indices {
        let info = candidate.info();
        let regions = info.region_count();
        let (color_prec, alpha_prec) = candidate.index_precisions();

        let mut palettes = [None; MAX_REGIONS];
        for r in 0..regions {
            palettes[r] = Some(candidate.palette(&endpoints[r]));
        }

        let mut indices = Indices {
            color: [0; 16],
            alpha: [0; 16],
            region_err: [0.0; MAX_REGIONS],
        };
        for (pixel, color) in self.pixels.iter().enumerate() {
            let r = region(info.partitions, candidate.shape, pixel);
            if let Some(palette) = &palettes[r] {
                let (err, color_index, alpha_index) = palette.nearest(*color);
                indices.region_err[r] += err;
                indices.color[pixel] = color_index;
                indices.alpha[pixel] = alpha_index;
            }
        }

        let color_max = (1 << color_prec) - 1;
        let color_high = 1 << (color_prec - 1);

        if alpha_prec == 0 {
            for r in 0..regions {
                if indices.color[anchor(info.partitions, candidate.shape, r)] & color_high == 0 {
                    continue;
                }

                endpoints[r].swap(0, 1);
                for pixel in 0..16 {
                    if region(info.partitions, candidate.shape, pixel) == r {
                        indices.color[pixel] = color_max - indices.color[pixel];
                        indices.alpha[pixel] = indices.color[pixel];
                    }
                }
            }
        } else {
            if indices.color[0] & color_high != 0 {
                for ch in 0..3 {
                    let [a, b] = &mut endpoints[0];
                    std::mem::swap(&mut a[ch], &mut b[ch]);
                }
                for index in indices.color.iter_mut() {
                    *index = color_max - *index;
                }
            }

            let alpha_max = (1 << alpha_prec) - 1;
            if indices.alpha[0] & (1 << (alpha_prec - 1)) != 0 {
                let [a, b] = &mut endpoints[0];
                std::mem::swap(&mut a[3], &mut b[3]);
                for index in indices.alpha.iter_mut() {
                    *index = alpha_max - *index;
                }
            }
        }

        indices
    }

    /// Optimizes the endpoints of one region, starting from `endpoints` and from the rough
    /// endpoints quantized for every assignment of the region's parity bits.
    fn optimize_endpoints(
        &self,
        candidate: &Candidate,
        region_id: usize,
        err: f32,
        endpoints: &Endpoints,
        rough: &Endpoints,
    ) -> Endpoints {
        let info = candidate.info();
        let mask = region_mask(info.partitions, candidate.shape, region_id);

        let mut pixels = [[0; 4]; 16];
        let mut count = 0;
        for k in (0..16).filter(|k| mask & (1 << k) != 0) {
            pixels[count] = self.pixels[k];
            count += 1;
        }
        let pixels = &pixels[..count];

        let (mut best_err, mut best) = optimize_one(candidate, pixels, err, endpoints);

        let region_p_bits = info.p_bits as usize / info.region_count();
        if region_p_bits == 0 || self.keeps_opaque_p_bits(candidate) {
            return best;
        }

        for bits in 0..1u8 << region_p_bits {
            if best_err == 0.0 {
                break;
            }

            let start: Endpoints = std::array::from_fn(|e| {
                let p = (bits >> (e * region_p_bits / 2)) & 1;
                quantize_with_p_bit(info, rough[e], p)
            });
            let start_err = map_colors(candidate, pixels, &start, f32::INFINITY);
            let (err, opt) = optimize_one(candidate, pixels, start_err, &start);
            if err < best_err {
                best_err = err;
                best = opt;
            }
        }

        best
    }

    /// Re-decodes the chosen block and checks it against the tracked error and the opacity
    /// of the pixels.
    fn validate(&self) {
        let decoded = decode_block(&self.best_block);
        let err: f32 = decoded
            .iter()
            .zip(self.pixels.iter())
            .map(|(a, b)| color_error(*a, *b, 4))
            .sum();

        if err != self.best_err {
            log::warn!(
                "BC7 mode {} block decodes with error {err}, expected {}",
                self.best_mode,
                self.best_err
            );
        }

        if self.opaque && decoded.iter().any(|pixel| pixel[3] != 255) {
            log::warn!("BC7 mode {} block lost the opacity of its pixels", self.best_mode);
        }

        log::trace!(
            "BC7 block encoded with mode {}, error {}",
            self.best_mode,
            self.best_err
        );
    }
}

/// Majority vote of the endpoint LSBs for every parity bit.
fn p_bit_votes(info: &ModeInfo, endpoints: &[Endpoints; MAX_REGIONS]) -> [u8; 6] {
    let endpoint_count = info.endpoint_count();
    let p_bits = info.p_bits as usize;

    let mut ones = [0u32; 6];
    let mut count = [0u32; 6];
    for (i, endpoint) in endpoints.iter().flatten().take(endpoint_count).enumerate() {
        let p = i * p_bits / endpoint_count;
        for ch in (0..4).filter(|&ch| info.has_p_bit(ch)) {
            ones[p] += u32::from(endpoint[ch] & 1);
            count[p] += 1;
        }
    }

    std::array::from_fn(|p| u8::from(ones[p] > count[p] / 2))
}

/// Sets the LSB of every channel with a parity bit to the value of its shared bit.
fn fix_p_bits(info: &ModeInfo, endpoints: &mut [Endpoints; MAX_REGIONS]) {
    if info.p_bits == 0 {
        return;
    }

    let votes = p_bit_votes(info, endpoints);
    let endpoint_count = info.endpoint_count();
    let p_bits = info.p_bits as usize;

    for (i, endpoint) in endpoints.iter_mut().flatten().take(endpoint_count).enumerate() {
        let p = votes[i * p_bits / endpoint_count];
        for ch in (0..4).filter(|&ch| info.has_p_bit(ch)) {
            endpoint[ch] = (endpoint[ch] & !1) | p;
        }
    }
}

/// Quantizes an endpoint to the nearest values whose LSB is `p` in every channel with a
/// parity bit.
fn quantize_with_p_bit(info: &ModeInfo, color: [u8; 4], p: u8) -> [u8; 4] {
    let quantized = quantize_color(color, info.color_prec_with_p);

    std::array::from_fn(|ch| {
        let value = quantized[ch];
        if !info.has_p_bit(ch) || value & 1 == p {
            return value;
        }

        // Both neighbours of a value with the wrong LSB have the right one
        let prec = info.color_prec_with_p[ch];
        let max = ((1u16 << prec) - 1) as u8;
        [value.checked_sub(1), (value < max).then(|| value + 1)]
            .into_iter()
            .flatten()
            .min_by_key(|&v| unquantize(v, prec).abs_diff(color[ch]))
            .unwrap_or(value)
    })
}

/// Returns true if no anchor index has its top bit set.
fn anchors_are_canonical(candidate: &Candidate, indices: &Indices) -> bool {
    let info = candidate.info();
    let (color_prec, alpha_prec) = candidate.index_precisions();

    let color_ok = if alpha_prec == 0 {
        (0..info.region_count())
            .map(|r| anchor(info.partitions, candidate.shape, r))
            .all(|pixel| indices.color[pixel] < 1 << (color_prec - 1))
    } else {
        indices.color[0] < 1 << (color_prec - 1)
    };

    color_ok && (alpha_prec == 0 || indices.alpha[0] < 1 << (alpha_prec - 1))
}

/// Replaces the stored bits of an endpoint channel and keeps its parity bit.
#[inline]
fn with_stored(value: u8, stored: u8, p_shift: u8) -> u8 {
    (stored << p_shift) | (value & p_shift)
}

/// Error of the best palette entries for `pixels`, or infinity once it exceeds `min_err`.
fn map_colors(candidate: &Candidate, pixels: &[[u8; 4]], pair: &Endpoints, min_err: f32) -> f32 {
    let palette = candidate.palette(pair);

    let mut total = 0.0;
    for pixel in pixels {
        total += palette.nearest(*pixel).0;
        if total > min_err {
            return f32::INFINITY;
        }
    }
    total
}

/// Moves one stored endpoint channel in halving steps while the error improves.
fn perturb_one(
    candidate: &Candidate,
    pixels: &[[u8; 4]],
    ch: usize,
    old: &Endpoints,
    old_err: f32,
    which: usize,
) -> (f32, Endpoints) {
    let info = candidate.info();
    let p_shift = u8::from(info.has_p_bit(ch));
    let prec = info.color_prec[ch];
    let levels = 1i32 << prec;

    let mut best = *old;
    let mut best_err = old_err;

    let mut step = 1i32 << (prec - 1);
    while step > 0 {
        let mut best_step = 0;
        for delta in [-step, step] {
            let stored = i32::from(best[which][ch] >> p_shift) + delta;
            if !(0..levels).contains(&stored) {
                continue;
            }

            let mut trial = best;
            trial[which][ch] = with_stored(best[which][ch], stored as u8, p_shift);
            let err = map_colors(candidate, pixels, &trial, best_err);
            if err < best_err {
                best_err = err;
                best_step = delta;
            }
        }

        if best_step != 0 {
            let stored = i32::from(best[which][ch] >> p_shift) + best_step;
            best[which][ch] = with_stored(best[which][ch], stored as u8, p_shift);
        }
        step >>= 1;
    }

    (best_err, best)
}

/// Tries every stored pair within a small window around the endpoints that keeps their order.
fn exhaustive(
    candidate: &Candidate,
    pixels: &[[u8; 4]],
    ch: usize,
    err: &mut f32,
    endpoints: &mut Endpoints,
) {
    const RANGE: i32 = 5;

    if *err == 0.0 {
        return;
    }

    let info = candidate.info();
    let p_shift = u8::from(info.has_p_bit(ch));
    let max = (1i32 << info.color_prec[ch]) - 1;
    let (old_a, old_b) = (endpoints[0][ch], endpoints[1][ch]);
    let a = i32::from(old_a >> p_shift);
    let b = i32::from(old_b >> p_shift);
    let (a_low, a_high) = (i32::max(a - RANGE, 0), i32::min(a + RANGE, max));
    let (b_low, b_high) = (i32::max(b - RANGE, 0), i32::min(b + RANGE, max));

    let mut best = (a, b);
    let mut trial = *endpoints;
    let mut try_pair = |ta: i32, tb: i32, err: &mut f32| {
        trial[0][ch] = with_stored(old_a, ta as u8, p_shift);
        trial[1][ch] = with_stored(old_b, tb as u8, p_shift);
        let trial_err = map_colors(candidate, pixels, &trial, *err);
        if trial_err < *err {
            *err = trial_err;
            best = (ta, tb);
        }
    };

    if a <= b {
        for ta in a_low..=a_high {
            for tb in i32::max(ta, b_low)..=b_high {
                try_pair(ta, tb, &mut *err);
            }
        }
    } else {
        for tb in b_low..=b_high {
            for ta in i32::max(tb, a_low)..=a_high {
                try_pair(ta, tb, &mut *err);
            }
        }
    }

    endpoints[0][ch] = with_stored(old_a, best.0 as u8, p_shift);
    endpoints[1][ch] = with_stored(old_b, best.1 as u8, p_shift);
}

/// Optimizes every channel of an endpoint pair. Parity bits stay as they are.
fn optimize_one(
    candidate: &Candidate,
    pixels: &[[u8; 4]],
    org_err: f32,
    org: &Endpoints,
) -> (f32, Endpoints) {
    let info = candidate.info();

    let mut opt = *org;
    let mut opt_err = org_err;

    for ch in (0..4).filter(|&ch| info.color_prec_with_p[ch] > 0) {
        // Start with the endpoint that improves most, then alternate
        let (err_a, new_a) = perturb_one(candidate, pixels, ch, &opt, opt_err, 0);
        let (err_b, new_b) = perturb_one(candidate, pixels, ch, &opt, opt_err, 1);

        let mut which = if err_a < err_b {
            if err_a >= opt_err {
                continue;
            }
            opt[0][ch] = new_a[0][ch];
            opt_err = err_a;
            1
        } else {
            if err_b >= opt_err {
                continue;
            }
            opt[1][ch] = new_b[1][ch];
            opt_err = err_b;
            0
        };

        loop {
            let (err, new) = perturb_one(candidate, pixels, ch, &opt, opt_err, which);
            if err >= opt_err {
                break;
            }
            opt[which][ch] = new[which][ch];
            opt_err = err;
            which ^= 1;
        }
    }

    for ch in (0..4).filter(|&ch| info.color_prec_with_p[ch] > 0) {
        exhaustive(candidate, pixels, ch, &mut opt_err, &mut opt);
    }

    (opt_err, opt)
}

fn emit_block(candidate: &Candidate, endpoints: &[Endpoints; MAX_REGIONS], indices: &Indices) -> Block {
    let info = candidate.info();
    let mut cursor = BitCursor::new();

    cursor.write_bits(candidate.mode as u32 + 1, 1 << candidate.mode);
    cursor.write_bits(u32::from(info.partition_bits), candidate.shape as u32);
    cursor.write_bits(u32::from(info.rotation_bits), candidate.rotation as u32);
    cursor.write_bits(u32::from(info.index_mode_bits), candidate.index_mode as u32);

    let endpoint_count = info.endpoint_count();
    for ch in 0..4 {
        let bits = u32::from(info.color_prec[ch]);
        for endpoint in endpoints.iter().flatten().take(endpoint_count) {
            let value = if info.has_p_bit(ch) {
                endpoint[ch] >> 1
            } else {
                endpoint[ch]
            };
            cursor.write_bits(bits, u32::from(value));
        }
    }

    let votes = p_bit_votes(info, endpoints);
    for &p in &votes[..info.p_bits as usize] {
        cursor.write_bits(1, u32::from(p));
    }

    let (primary, secondary) = match candidate.index_mode {
        0 => (&indices.color, &indices.alpha),
        _ => (&indices.alpha, &indices.color),
    };

    for (pixel, &index) in primary.iter().enumerate() {
        let bits = if is_anchor(info.partitions, candidate.shape, pixel) {
            info.index_prec - 1
        } else {
            info.index_prec
        };
        debug_assert!(index < 1 << bits, "index {index} of pixel {pixel} needs more than {bits} bits");
        cursor.write_bits(u32::from(bits), index as u32);
    }

    if info.index_prec2 > 0 {
        for (pixel, &index) in secondary.iter().enumerate() {
            let bits = if pixel == 0 {
                info.index_prec2 - 1
            } else {
                info.index_prec2
            };
            debug_assert!(index < 1 << bits, "index {index} of pixel {pixel} needs more than {bits} bits");
            cursor.write_bits(u32::from(bits), index as u32);
        }
    }

    debug_assert_eq!(cursor.position(), 128);

    cursor.to_block()
}
