//! NTLM negotiation flags (MS-NLMP §2.2.2.5). Bit positions are taken from
//! the published constants, not from a sequential declaration order — several
//! slots are reserved and must stay reserved.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NegotiateFlags: u32 {
        /// A-bit
        const UNICODE = 0x0000_0001;
        /// B-bit
        const OEM = 0x0000_0002;
        /// C-bit
        const REQUEST_TARGET = 0x0000_0004;
        /// D-bit
        const SIGN = 0x0000_0010;
        /// E-bit
        const SEAL = 0x0000_0020;
        /// F
        const DATAGRAM = 0x0000_0040;
        /// G-bit, deprecated/insecure
        const LM_KEY = 0x0000_0080;
        /// H-bit, deprecated/insecure
        const NTLM = 0x0000_0200;
        /// J
        const ANONYMOUS = 0x0000_0800;
        /// K-bit
        const DOMAIN_SUPPLIED = 0x0000_1000;
        /// L-bit
        const WORKSTATION_SUPPLIED = 0x0000_2000;
        /// M-bit
        const ALWAYS_SIGN = 0x0000_8000;
        /// N
        const TARGET_TYPE_DOMAIN = 0x0001_0000;
        /// O
        const TARGET_TYPE_SERVER = 0x0002_0000;
        /// P-bit
        const EXTENDED_SESSION_SECURITY = 0x0008_0000;
        /// Q
        const IDENTIFY = 0x0010_0000;
        /// R
        const REQUEST_NON_NT_SESSION_KEY = 0x0040_0000;
        /// S-bit
        const TARGET_INFO = 0x0080_0000;
        /// r6
        const VERSION = 0x0200_0000;
        /// U-bit
        const NEGOTIATE_128 = 0x2000_0000;
        /// V-bit
        const KEY_EXCH = 0x4000_0000;
        /// W-bit
        const NEGOTIATE_56 = 0x8000_0000;
    }
}
